//! The Registry - immutable lookup of type and tag definitions.

use crate::{RegistryError, SubtypeIndex, TagDef, TypeDef};
use reach_core::{ListRef, MapRef, Object, ObjectRef, PropertiesRef, TypeDesc, TypeId, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// The Registry provides runtime lookup of type and tag definitions.
/// It is immutable after construction.
#[derive(Debug)]
pub struct Registry {
    /// Type definitions by ID.
    types: HashMap<TypeId, Arc<TypeDef>>,
    /// Type ID lookup by name.
    type_names: HashMap<String, TypeId>,

    /// Tag definitions by name.
    tags: HashMap<String, Arc<TagDef>>,

    /// Precomputed subtype relationships.
    subtype_index: SubtypeIndex,
}

impl Registry {
    pub(crate) fn new(
        types: HashMap<TypeId, Arc<TypeDef>>,
        type_names: HashMap<String, TypeId>,
        tags: HashMap<String, Arc<TagDef>>,
        subtype_index: SubtypeIndex,
    ) -> Self {
        Self {
            types,
            type_names,
            tags,
            subtype_index,
        }
    }

    // ==================== Type Lookups ====================

    /// Get a type definition by name.
    pub fn get_type_by_name(&self, name: &str) -> Option<&Arc<TypeDef>> {
        self.type_names.get(name).and_then(|id| self.types.get(id))
    }

    /// Get a type definition by ID.
    pub fn get_type(&self, id: TypeId) -> Option<&Arc<TypeDef>> {
        self.types.get(&id)
    }

    /// Get a type ID by name.
    pub fn get_type_id(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    /// All types, in declaration order.
    pub fn all_types(&self) -> Vec<&Arc<TypeDef>> {
        let mut types: Vec<_> = self.types.values().collect();
        types.sort_by_key(|t| t.id);
        types
    }

    /// Number of types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// The type followed by its ancestors, nearest first.
    pub fn lineage(&self, name: &str) -> Vec<&Arc<TypeDef>> {
        let Some(type_def) = self.get_type_by_name(name) else {
            return Vec::new();
        };
        std::iter::once(type_def)
            .chain(
                type_def
                    .supertypes
                    .iter()
                    .filter_map(|s| self.get_type_by_name(s)),
            )
            .collect()
    }

    // ==================== Tag Lookups ====================

    /// Get a tag definition by name.
    pub fn get_tag(&self, name: &str) -> Option<&Arc<TagDef>> {
        self.tags.get(name)
    }

    /// All tag definitions, in declaration order.
    pub fn all_tags(&self) -> Vec<&Arc<TagDef>> {
        let mut tags: Vec<_> = self.tags.values().collect();
        tags.sort_by_key(|t| t.id);
        tags
    }

    // ==================== Subtype Queries ====================

    /// Check if `sub` is a subtype of `super_type` (or the same type).
    pub fn is_subtype(&self, sub: TypeId, super_type: TypeId) -> bool {
        self.subtype_index.is_subtype(sub, super_type)
    }

    /// Check subtyping by type name. Unknown names are never subtypes.
    pub fn is_subtype_by_name(&self, sub: &str, super_type: &str) -> bool {
        match (self.get_type_id(sub), self.get_type_id(super_type)) {
            (Some(sub), Some(super_type)) => self.is_subtype(sub, super_type),
            _ => false,
        }
    }

    /// Get all subtypes of a type.
    pub fn get_subtypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtype_index.get_subtypes(type_id)
    }

    /// Declared-type assignability: can a slot of type `to` hold values declared as `from`?
    pub fn is_assignable(&self, to: &TypeDesc, from: &TypeDesc) -> bool {
        to.is_assignable_from(from, &|sub, sup| self.is_subtype_by_name(sub, sup))
    }

    // ==================== Instances ====================

    /// Create an object of the named type with every field at its initial value.
    pub fn instantiate(&self, name: &str) -> Result<ObjectRef, RegistryError> {
        let type_def = self
            .get_type_by_name(name)
            .ok_or_else(|| RegistryError::UnknownType(name.to_string()))?;
        if type_def.is_abstract {
            return Err(RegistryError::AbstractType(name.to_string()));
        }

        let mut object = Object::new(type_def.name.clone(), type_def.supertypes.clone());
        // Ancestors first so a redeclared field keeps the nearest initial value
        for def in self.lineage(name).into_iter().rev() {
            for field in &def.fields {
                let initial = match (&field.default, field.initialized) {
                    (Some(value), _) => value.clone(),
                    (None, true) => empty_container(&field.type_desc),
                    (None, false) => Value::Null,
                };
                object.set(field.name.clone(), initial);
            }
        }
        Ok(ObjectRef::new(object))
    }
}

fn empty_container(type_desc: &TypeDesc) -> Value {
    match type_desc {
        TypeDesc::List(element) => Value::List(ListRef::new((**element).clone(), Vec::new())),
        TypeDesc::Map(value) => Value::Map(MapRef::new((**value).clone())),
        TypeDesc::Properties => Value::Properties(PropertiesRef::new()),
        _ => Value::Null,
    }
}
