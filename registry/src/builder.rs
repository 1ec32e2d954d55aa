//! RegistryBuilder for constructing an immutable Registry.

use crate::{
    builtin, AccessorDef, FieldDef, MutatorDef, Registry, SubtypeIndex, TagDef, TagParam, TypeDef,
};
use reach_core::{Tag, TagId, TypeDesc, TypeId, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Duplicate tag name: {0}")]
    DuplicateTagName(String),

    #[error("Unknown parent type: {0}")]
    UnknownParentType(String),

    #[error("Duplicate {kind} '{member}' on {owner}")]
    DuplicateMember {
        owner: String,
        kind: &'static str,
        member: String,
    },

    #[error("Unknown tag: @{0}")]
    UnknownTag(String),

    #[error("Unknown parameter '{param}' on @{tag}")]
    UnknownTagParam { tag: String, param: String },

    #[error("Missing required parameter '{param}' on @{tag}")]
    MissingTagParam { tag: String, param: String },

    #[error("Parameter '{param}' on @{tag} expects {expected}, got {actual}")]
    InvalidTagParam {
        tag: String,
        param: String,
        expected: TypeDesc,
        actual: String,
    },

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Cannot instantiate abstract type: {0}")]
    AbstractType(String),
}

/// Builder for constructing an immutable Registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Next type ID to allocate.
    next_type_id: u32,
    /// Next tag ID to allocate.
    next_tag_id: u32,

    /// Types being built.
    types: HashMap<TypeId, TypeDef>,
    /// Type name to ID mapping.
    type_names: HashMap<String, TypeId>,

    /// Tag types being built, by name.
    tags: HashMap<String, TagDef>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with the built-in constraint and marker tags registered.
    pub fn with_builtin_tags() -> Self {
        let mut builder = Self::new();
        builtin::register(&mut builder);
        builder
    }

    /// Add a type definition.
    pub fn add_type(&mut self, name: impl Into<String>) -> TypeBuilder<'_> {
        let name = name.into();
        let id = TypeId::new(self.next_type_id);
        self.next_type_id += 1;

        TypeBuilder {
            builder: self,
            id,
            name,
            parent_names: Vec::new(),
            fields: Vec::new(),
            accessors: Vec::new(),
            mutators: Vec::new(),
            tags: Vec::new(),
            is_abstract: false,
        }
    }

    /// Add a tag type definition.
    pub fn add_tag(&mut self, name: impl Into<String>) -> TagBuilder<'_> {
        let name = name.into();
        let id = TagId::new(self.next_tag_id);
        self.next_tag_id += 1;

        TagBuilder {
            builder: self,
            id,
            name,
            params: Vec::new(),
            validator: None,
            meta_tags: Vec::new(),
            merge_elements: false,
        }
    }

    /// Check a tag instance against its definition and fill parameter defaults.
    fn normalize(&self, tag: &Tag) -> Result<Tag, RegistryError> {
        let def = self
            .tags
            .get(tag.name())
            .ok_or_else(|| RegistryError::UnknownTag(tag.name().to_string()))?;

        for (param, value) in tag.params() {
            let param_def = def.param(param).ok_or_else(|| RegistryError::UnknownTagParam {
                tag: def.name.clone(),
                param: param.to_string(),
            })?;
            if value.is_null() || !param_def.type_desc.accepts(value) {
                return Err(RegistryError::InvalidTagParam {
                    tag: def.name.clone(),
                    param: param.to_string(),
                    expected: param_def.type_desc.clone(),
                    actual: value.type_name().to_string(),
                });
            }
        }

        let mut normalized = Tag::new(def.name.clone());
        for param_def in &def.params {
            let value = match (tag.get(&param_def.name), &param_def.default) {
                (Some(value), _) => value.clone(),
                (None, Some(default)) => default.clone(),
                (None, None) => {
                    return Err(RegistryError::MissingTagParam {
                        tag: def.name.clone(),
                        param: param_def.name.clone(),
                    })
                }
            };
            normalized = normalized.with(param_def.name.clone(), value);
        }
        Ok(normalized)
    }

    fn normalize_all(&self, tags: &[Tag]) -> Result<Vec<Tag>, RegistryError> {
        tags.iter().map(|tag| self.normalize(tag)).collect()
    }

    /// Build the immutable Registry.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let types: HashMap<TypeId, Arc<TypeDef>> = self
            .types
            .into_iter()
            .map(|(id, def)| (id, Arc::new(def)))
            .collect();
        let tags: HashMap<String, Arc<TagDef>> = self
            .tags
            .into_iter()
            .map(|(name, def)| (name, Arc::new(def)))
            .collect();

        let subtype_index = SubtypeIndex::build(&types);

        debug!(types = types.len(), tags = tags.len(), "registry built");

        Ok(Registry::new(types, self.type_names, tags, subtype_index))
    }
}

fn check_unique<'n>(
    owner: &str,
    kind: &'static str,
    names: impl Iterator<Item = &'n str>,
) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(RegistryError::DuplicateMember {
                owner: owner.to_string(),
                kind,
                member: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Builder for a type definition.
pub struct TypeBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: TypeId,
    name: String,
    parent_names: Vec<String>,
    fields: Vec<FieldDef>,
    accessors: Vec<AccessorDef>,
    mutators: Vec<MutatorDef>,
    tags: Vec<Tag>,
    is_abstract: bool,
}

impl<'a> TypeBuilder<'a> {
    /// Add a parent type by name.
    pub fn extends(mut self, parent_name: impl Into<String>) -> Self {
        self.parent_names.push(parent_name.into());
        self
    }

    /// Add a directly declared slot.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a read path.
    pub fn accessor(mut self, accessor: AccessorDef) -> Self {
        self.accessors.push(accessor);
        self
    }

    /// Add a write path.
    pub fn mutator(mut self, mutator: MutatorDef) -> Self {
        self.mutators.push(mutator);
        self
    }

    /// Add a field together with a slot accessor and mutator of the same name.
    pub fn property(self, name: impl Into<String>, type_desc: TypeDesc) -> Self {
        let name = name.into();
        self.field(FieldDef::new(name.clone(), type_desc.clone()))
            .accessor(AccessorDef::of_field(name.clone(), type_desc.clone()))
            .mutator(MutatorDef::of_field(name, type_desc))
    }

    /// Add a type-level tag.
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Mark as abstract.
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Finish building this type.
    pub fn done(self) -> Result<TypeId, RegistryError> {
        // Check for duplicate name
        if self.builder.type_names.contains_key(&self.name) {
            return Err(RegistryError::DuplicateTypeName(self.name));
        }

        check_unique(&self.name, "field", self.fields.iter().map(|f| f.name.as_str()))?;
        check_unique(&self.name, "accessor", self.accessors.iter().map(|a| a.name.as_str()))?;
        check_unique(&self.name, "mutator", self.mutators.iter().map(|m| m.name.as_str()))?;

        // Resolve parents; lineage is nearest first without repeats
        let mut parent_ids = Vec::new();
        let mut supertypes: Vec<String> = Vec::new();
        for parent_name in &self.parent_names {
            let parent_id = *self
                .builder
                .type_names
                .get(parent_name)
                .ok_or_else(|| RegistryError::UnknownParentType(parent_name.clone()))?;
            parent_ids.push(parent_id);
            if let Some(parent) = self.builder.types.get(&parent_id) {
                for name in std::iter::once(&parent.name).chain(parent.supertypes.iter()) {
                    if !supertypes.contains(name) {
                        supertypes.push(name.clone());
                    }
                }
            }
        }

        let mut fields = self.fields;
        for field in &mut fields {
            field.tags = self.builder.normalize_all(&field.tags)?;
        }
        let mut accessors = self.accessors;
        for accessor in &mut accessors {
            accessor.tags = self.builder.normalize_all(&accessor.tags)?;
        }
        let mut mutators = self.mutators;
        for mutator in &mut mutators {
            mutator.tags = self.builder.normalize_all(&mutator.tags)?;
        }
        let tags = self.builder.normalize_all(&self.tags)?;

        let type_def = TypeDef {
            id: self.id,
            name: self.name.clone(),
            parent_ids,
            supertypes,
            fields,
            accessors,
            mutators,
            tags,
            is_abstract: self.is_abstract,
        };

        self.builder.type_names.insert(self.name, self.id);
        self.builder.types.insert(self.id, type_def);

        Ok(self.id)
    }
}

/// Builder for a tag type definition.
pub struct TagBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: TagId,
    name: String,
    params: Vec<TagParam>,
    validator: Option<String>,
    meta_tags: Vec<Tag>,
    merge_elements: bool,
}

impl<'a> TagBuilder<'a> {
    /// Add a required parameter.
    pub fn param(mut self, name: impl Into<String>, type_desc: TypeDesc) -> Self {
        self.params.push(TagParam {
            name: name.into(),
            type_desc,
            default: None,
        });
        self
    }

    /// Add a parameter with a default value.
    pub fn param_default(
        mut self,
        name: impl Into<String>,
        type_desc: TypeDesc,
        default: impl Into<Value>,
    ) -> Self {
        self.params.push(TagParam {
            name: name.into(),
            type_desc,
            default: Some(default.into()),
        });
        self
    }

    /// Name the validator that enforces this tag.
    pub fn validator(mut self, validator_id: impl Into<String>) -> Self {
        self.validator = Some(validator_id.into());
        self
    }

    /// Compose this tag from another, already declared tag.
    pub fn meta_tag(mut self, tag: Tag) -> Self {
        self.meta_tags.push(tag);
        self
    }

    /// Merge nested violations reported by the validator into the parent result.
    pub fn merge_elements(mut self) -> Self {
        self.merge_elements = true;
        self
    }

    /// Finish building this tag type.
    pub fn done(self) -> Result<TagId, RegistryError> {
        if self.builder.tags.contains_key(&self.name) {
            return Err(RegistryError::DuplicateTagName(self.name));
        }
        check_unique(&self.name, "parameter", self.params.iter().map(|p| p.name.as_str()))?;

        for param in &self.params {
            if let Some(default) = &param.default {
                if !param.type_desc.accepts(default) {
                    return Err(RegistryError::InvalidTagParam {
                        tag: self.name.clone(),
                        param: param.name.clone(),
                        expected: param.type_desc.clone(),
                        actual: default.type_name().to_string(),
                    });
                }
            }
        }

        let meta_tags = self.builder.normalize_all(&self.meta_tags)?;

        let tag_def = TagDef {
            id: self.id,
            name: self.name.clone(),
            params: self.params,
            validator: self.validator,
            meta_tags,
            merge_elements: self.merge_elements,
        };

        self.builder.tags.insert(self.name, tag_def);
        Ok(self.id)
    }
}
