//! Definition types: structured-object types and tag types.

use reach_core::{AccessFault, Object, Tag, TagId, TypeDesc, TypeId, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Reads a logical value out of an object.
pub type Getter = Arc<dyn Fn(&Object) -> Result<Value, AccessFault> + Send + Sync>;

/// Writes a logical value into an object.
pub type Setter = Arc<dyn Fn(&mut Object, Value) -> Result<(), AccessFault> + Send + Sync>;

/// A slot declared directly on a type.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Declared type.
    pub type_desc: TypeDesc,
    /// Tags declared on the field.
    pub tags: Vec<Tag>,
    /// Whether the slot rejects direct writes.
    pub read_only: bool,
    /// Initial value for scalar fields.
    pub default: Option<Value>,
    /// Whether container fields start as a fresh empty container.
    pub initialized: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, type_desc: TypeDesc) -> Self {
        Self {
            name: name.into(),
            type_desc,
            tags: Vec::new(),
            read_only: false,
            default: None,
            initialized: false,
        }
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Start List/Map/Properties fields as a fresh empty container per instance.
    pub fn initialized(mut self) -> Self {
        self.initialized = true;
        self
    }
}

/// A read path for a logical member name.
#[derive(Clone)]
pub struct AccessorDef {
    /// Logical member name.
    pub name: String,
    /// Return type.
    pub returns: TypeDesc,
    /// Tags declared on the accessor.
    pub tags: Vec<Tag>,
    /// The read implementation.
    pub getter: Getter,
}

impl AccessorDef {
    pub fn new<F>(name: impl Into<String>, returns: TypeDesc, getter: F) -> Self
    where
        F: Fn(&Object) -> Result<Value, AccessFault> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            returns,
            tags: Vec::new(),
            getter: Arc::new(getter),
        }
    }

    /// An accessor that reads the slot of the same name.
    pub fn of_field(name: impl Into<String>, returns: TypeDesc) -> Self {
        let name = name.into();
        let slot = name.clone();
        Self::new(name, returns, move |object: &Object| Ok(object.get(&slot)))
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }
}

impl fmt::Debug for AccessorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorDef")
            .field("name", &self.name)
            .field("returns", &self.returns)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// A write path for a logical member name.
#[derive(Clone)]
pub struct MutatorDef {
    /// Logical member name.
    pub name: String,
    /// Parameter type.
    pub accepts: TypeDesc,
    /// Tags declared on the mutator.
    pub tags: Vec<Tag>,
    /// The write implementation.
    pub setter: Setter,
}

impl MutatorDef {
    pub fn new<F>(name: impl Into<String>, accepts: TypeDesc, setter: F) -> Self
    where
        F: Fn(&mut Object, Value) -> Result<(), AccessFault> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            accepts,
            tags: Vec::new(),
            setter: Arc::new(setter),
        }
    }

    /// A mutator that writes the slot of the same name.
    pub fn of_field(name: impl Into<String>, accepts: TypeDesc) -> Self {
        let name = name.into();
        let slot = name.clone();
        Self::new(name, accepts, move |object: &mut Object, value: Value| {
            object.set(slot.clone(), value);
            Ok(())
        })
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }
}

impl fmt::Debug for MutatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutatorDef")
            .field("name", &self.name)
            .field("accepts", &self.accepts)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// Structured-object type definition.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Unique identifier.
    pub id: TypeId,
    /// Type name.
    pub name: String,
    /// Direct parent type IDs, in declaration order.
    pub parent_ids: Vec<TypeId>,
    /// Transitive supertype names, nearest first.
    pub supertypes: Vec<String>,
    /// Directly declared slots, in declaration order.
    pub fields: Vec<FieldDef>,
    /// Read paths, in declaration order.
    pub accessors: Vec<AccessorDef>,
    /// Write paths, in declaration order.
    pub mutators: Vec<MutatorDef>,
    /// Type-level tags.
    pub tags: Vec<Tag>,
    /// Whether this type is abstract (cannot be instantiated directly).
    pub is_abstract: bool,
}

impl TypeDef {
    pub fn new(id: TypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_ids: Vec::new(),
            supertypes: Vec::new(),
            fields: Vec::new(),
            accessors: Vec::new(),
            mutators: Vec::new(),
            tags: Vec::new(),
            is_abstract: false,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn accessor(&self, name: &str) -> Option<&AccessorDef> {
        self.accessors.iter().find(|a| a.name == name)
    }

    pub fn mutator(&self, name: &str) -> Option<&MutatorDef> {
        self.mutators.iter().find(|m| m.name == name)
    }

    /// Logical member names in discovery order: fields first, then
    /// accessor-only names, then mutator-only names.
    pub fn member_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        let declared = self
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .chain(self.accessors.iter().map(|a| a.name.as_str()))
            .chain(self.mutators.iter().map(|m| m.name.as_str()));
        for name in declared {
            if seen.insert(name) {
                names.push(name);
            }
        }
        names
    }

    /// Returns true if this type is `name` or inherits from it.
    pub fn is_a(&self, name: &str) -> bool {
        self.name == name || self.supertypes.iter().any(|s| s == name)
    }

    /// Returns true if the type carries a tag of the given name.
    pub fn has_tag(&self, tag_name: &str) -> bool {
        self.tags.iter().any(|t| t.name() == tag_name)
    }
}

/// A parameter declared on a tag type.
#[derive(Debug, Clone)]
pub struct TagParam {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    pub type_desc: TypeDesc,
    /// Default value; a parameter without one must be given on every instance.
    pub default: Option<Value>,
}

/// Tag type definition.
#[derive(Debug, Clone)]
pub struct TagDef {
    /// Unique identifier.
    pub id: TagId,
    /// Tag name.
    pub name: String,
    /// Declared parameters, in declaration order.
    pub params: Vec<TagParam>,
    /// Identifier of the validator that enforces this tag, if it is a constraint.
    pub validator: Option<String>,
    /// Tags declared on the tag type itself (domain composition).
    pub meta_tags: Vec<Tag>,
    /// Whether nested violations reported by the validator are merged into the parent result.
    pub merge_elements: bool,
}

impl TagDef {
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            params: Vec::new(),
            validator: None,
            meta_tags: Vec::new(),
            merge_elements: false,
        }
    }

    /// Get a parameter definition by name.
    pub fn param(&self, name: &str) -> Option<&TagParam> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Returns true if this tag is composed of other tags.
    pub fn is_composite(&self) -> bool {
        !self.meta_tags.is_empty()
    }

    /// Returns true if this tag is enforced by a validator.
    pub fn is_constraint(&self) -> bool {
        self.validator.is_some() || self.is_composite()
    }
}

/// Precomputed subtype relationships.
#[derive(Debug, Default)]
pub struct SubtypeIndex {
    /// For each type, the set of all its subtypes (transitive).
    subtypes: HashMap<TypeId, HashSet<TypeId>>,
    /// For each type, the set of all its supertypes (transitive).
    supertypes: HashMap<TypeId, HashSet<TypeId>>,
}

impl SubtypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the subtype index from type definitions.
    ///
    /// Parents are always declared before their children, so one pass in id
    /// order closes the relation.
    pub fn build(types: &HashMap<TypeId, Arc<TypeDef>>) -> Self {
        let mut index = Self::new();

        let mut ids: Vec<TypeId> = types.keys().copied().collect();
        ids.sort();

        for type_id in ids {
            index.subtypes.entry(type_id).or_default();
            let mut supers = HashSet::new();
            if let Some(type_def) = types.get(&type_id) {
                for &parent_id in &type_def.parent_ids {
                    supers.insert(parent_id);
                    if let Some(parent_supers) = index.supertypes.get(&parent_id) {
                        supers.extend(parent_supers.iter().copied());
                    }
                }
            }
            for &super_id in &supers {
                index.subtypes.entry(super_id).or_default().insert(type_id);
            }
            index.supertypes.insert(type_id, supers);
        }

        index
    }

    /// Check if `sub` is a subtype of `super_type`.
    pub fn is_subtype(&self, sub: TypeId, super_type: TypeId) -> bool {
        if sub == super_type {
            return true;
        }
        self.supertypes
            .get(&sub)
            .map(|set| set.contains(&super_type))
            .unwrap_or(false)
    }

    /// Get all subtypes of a type (not including the type itself).
    pub fn get_subtypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtypes
            .get(&type_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}
