//! Type descriptors.
//!
//! A `TypeDesc` names the declared type of a member or the type of a
//! container. Container types also select the adapter used to discover
//! their members (see [`ContainerKind`]).

use crate::Value;
use std::fmt;

/// Declared or runtime type of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeDesc {
    /// Accepts any value.
    Any,
    /// Boolean.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// UTF-8 string.
    String,
    /// Sequence with an element type.
    List(Box<TypeDesc>),
    /// String-keyed ordered map with a value type.
    Map(Box<TypeDesc>),
    /// Structured object registered under a type name.
    Object(String),
    /// String-to-string property store.
    Properties,
    /// External tabular row cursor.
    Cursor,
    /// Metadata tag instance of the named tag type.
    Tag(String),
}

/// The shape of a container, used for adapter dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Structured object: fields plus merged accessor/mutator pairs.
    Object,
    /// Metadata tag: every declared parameter is a read-only member.
    Tag,
    /// Sequence: one member per index plus `first` and `last`.
    Sequence,
    /// Ordered map: one member per live key.
    Map,
    /// String-keyed property store: one member per live key.
    Properties,
    /// Row cursor: members synthesized per column name or ordinal.
    Cursor,
}

impl ContainerKind {
    /// Whether members of this kind are discovered per type and memoized.
    ///
    /// The remaining kinds depend on the live instance (length, keys, columns).
    pub fn is_type_level(&self) -> bool {
        matches!(self, ContainerKind::Object | ContainerKind::Tag)
    }
}

impl TypeDesc {
    /// Create a list type.
    pub fn list(element: TypeDesc) -> Self {
        TypeDesc::List(Box::new(element))
    }

    /// Create a map type.
    pub fn map(value: TypeDesc) -> Self {
        TypeDesc::Map(Box::new(value))
    }

    /// Create an object type.
    pub fn object(name: impl Into<String>) -> Self {
        TypeDesc::Object(name.into())
    }

    /// Create a tag type.
    pub fn tag(name: impl Into<String>) -> Self {
        TypeDesc::Tag(name.into())
    }

    /// Returns the container kind for this type, if it is a container.
    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            TypeDesc::Object(_) => Some(ContainerKind::Object),
            TypeDesc::Tag(_) => Some(ContainerKind::Tag),
            TypeDesc::List(_) => Some(ContainerKind::Sequence),
            TypeDesc::Map(_) => Some(ContainerKind::Map),
            TypeDesc::Properties => Some(ContainerKind::Properties),
            TypeDesc::Cursor => Some(ContainerKind::Cursor),
            TypeDesc::Any
            | TypeDesc::Bool
            | TypeDesc::Int
            | TypeDesc::Float
            | TypeDesc::String => None,
        }
    }

    /// Returns true if values of this type expose members.
    pub fn is_container(&self) -> bool {
        self.container_kind().is_some()
    }

    /// Returns true if `value` may be stored in a slot of this type.
    ///
    /// Null fits every type. Objects fit when their lineage contains the
    /// declared name.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (TypeDesc::Any, _) => true,
            (TypeDesc::Bool, Value::Bool(_)) => true,
            (TypeDesc::Int, Value::Int(_)) => true,
            (TypeDesc::Float, Value::Float(_) | Value::Int(_)) => true,
            (TypeDesc::String, Value::String(_)) => true,
            (TypeDesc::List(element), Value::List(list)) => {
                **element == TypeDesc::Any || **element == list.element_type()
            }
            (TypeDesc::Map(element), Value::Map(map)) => {
                **element == TypeDesc::Any || **element == map.value_type()
            }
            (TypeDesc::Object(name), Value::Object(object)) => object.is_a(name),
            (TypeDesc::Properties, Value::Properties(_)) => true,
            (TypeDesc::Cursor, Value::Cursor(_)) => true,
            (TypeDesc::Tag(name), Value::Tag(tag)) => tag.name() == name,
            _ => false,
        }
    }

    /// Declared-type assignability: can a slot of type `self` hold values
    /// declared as `other`?
    ///
    /// `is_subtype(sub, super)` answers object lineage questions; the
    /// registry supplies it from its precomputed subtype index.
    pub fn is_assignable_from(
        &self,
        other: &TypeDesc,
        is_subtype: &dyn Fn(&str, &str) -> bool,
    ) -> bool {
        match (self, other) {
            (TypeDesc::Any, _) => true,
            (TypeDesc::Float, TypeDesc::Int) => true,
            (TypeDesc::List(a), TypeDesc::List(b)) | (TypeDesc::Map(a), TypeDesc::Map(b)) => {
                **a == TypeDesc::Any || a == b
            }
            (TypeDesc::Object(a), TypeDesc::Object(b)) => a == b || is_subtype(b, a),
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Any => write!(f, "Any"),
            TypeDesc::Bool => write!(f, "Bool"),
            TypeDesc::Int => write!(f, "Int"),
            TypeDesc::Float => write!(f, "Float"),
            TypeDesc::String => write!(f, "String"),
            TypeDesc::List(element) => write!(f, "List<{}>", element),
            TypeDesc::Map(value) => write!(f, "Map<{}>", value),
            TypeDesc::Object(name) => write!(f, "{}", name),
            TypeDesc::Properties => write!(f, "Properties"),
            TypeDesc::Cursor => write!(f, "Cursor"),
            TypeDesc::Tag(name) => write!(f, "@{}", name),
        }
    }
}
