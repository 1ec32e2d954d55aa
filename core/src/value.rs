//! Value types for Reach members.
//!
//! Values are what members read and write. Reach supports scalar types
//! (Bool, Int, Float, String) and container types (Object, List, Map,
//! Properties, Cursor, Tag). Containers are shared handles and compare by
//! identity; scalars and tags compare structurally.

use crate::{ContainerKind, CursorRef, ListRef, MapRef, ObjectRef, PropertiesRef, Tag, TypeDesc};
use std::fmt;

/// A value that can be read from or written to a member.
#[derive(Debug, Clone)]
pub enum Value {
    /// Null/missing value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Structured object.
    Object(ObjectRef),
    /// Sequence of values.
    List(ListRef),
    /// String-keyed ordered map.
    Map(MapRef),
    /// String-to-string property store.
    Properties(PropertiesRef),
    /// External row cursor.
    Cursor(CursorRef),
    /// Metadata tag instance.
    Tag(Tag),
}

impl Value {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as boolean if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer if this is an Int value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as a float if this is any numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as string reference if this is a String value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListRef> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapRef> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_properties(&self) -> Option<&PropertiesRef> {
        match self {
            Value::Properties(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_cursor(&self) -> Option<&CursorRef> {
        match self {
            Value::Cursor(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Value::Tag(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Object(_) => "Object",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Properties(_) => "Properties",
            Value::Cursor(_) => "Cursor",
            Value::Tag(_) => "Tag",
        }
    }

    /// Returns the runtime type of this value. Null reports `Any`.
    pub fn type_desc(&self) -> TypeDesc {
        match self {
            Value::Null => TypeDesc::Any,
            Value::Bool(_) => TypeDesc::Bool,
            Value::Int(_) => TypeDesc::Int,
            Value::Float(_) => TypeDesc::Float,
            Value::String(_) => TypeDesc::String,
            Value::Object(o) => TypeDesc::Object(o.type_name()),
            Value::List(l) => TypeDesc::list(l.element_type()),
            Value::Map(m) => TypeDesc::map(m.value_type()),
            Value::Properties(_) => TypeDesc::Properties,
            Value::Cursor(_) => TypeDesc::Cursor,
            Value::Tag(t) => TypeDesc::tag(t.name()),
        }
    }

    /// Returns the container kind of this value, if it exposes members.
    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            Value::Object(_) => Some(ContainerKind::Object),
            Value::Tag(_) => Some(ContainerKind::Tag),
            Value::List(_) => Some(ContainerKind::Sequence),
            Value::Map(_) => Some(ContainerKind::Map),
            Value::Properties(_) => Some(ContainerKind::Properties),
            Value::Cursor(_) => Some(ContainerKind::Cursor),
            _ => None,
        }
    }

    /// Reference identity for containers; structural equality otherwise.
    ///
    /// This is exactly `==`; the name documents intent at call sites that
    /// rely on identity (bound members, validation targets).
    pub fn same_instance(&self, other: &Value) -> bool {
        self == other
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Tag(a), Value::Tag(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Properties(a), Value::Properties(b)) => a.ptr_eq(b),
            (Value::Cursor(a), Value::Cursor(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Object(o) => write!(f, "{}{{..}}", o.type_name()),
            Value::List(l) => write!(f, "[{} items]", l.len()),
            Value::Map(m) => write!(f, "{{{} entries}}", m.len()),
            Value::Properties(p) => write!(f, "properties({})", p.len()),
            Value::Cursor(_) => write!(f, "cursor"),
            Value::Tag(t) => write!(f, "{}", t),
        }
    }
}

// Convenient From implementations
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Value::Object(o)
    }
}

impl From<ListRef> for Value {
    fn from(l: ListRef) -> Self {
        Value::List(l)
    }
}

impl From<MapRef> for Value {
    fn from(m: MapRef) -> Self {
        Value::Map(m)
    }
}

impl From<PropertiesRef> for Value {
    fn from(p: PropertiesRef) -> Self {
        Value::Properties(p)
    }
}

impl From<CursorRef> for Value {
    fn from(c: CursorRef) -> Self {
        Value::Cursor(c)
    }
}

impl From<Tag> for Value {
    fn from(t: Tag) -> Self {
        Value::Tag(t)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
