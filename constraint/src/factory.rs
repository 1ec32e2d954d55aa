//! Constraint resolution: mapping tag instances to validators.

use crate::validators::{self, DomainValidator};
use crate::{
    ConstraintError, ConstraintResult, EngineConfig, ValidationEngine, Validator,
    ValidatorContext, ValidatorRegistration,
};
use reach_core::{Tag, TypeDesc};
use reach_element::Elements;
use reach_registry::{Registry, TagDef};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builds validators for tag instances.
///
/// A tag definition names its validator by identifier; the factory keeps one
/// registration per identifier. Tag definitions with meta-tags and no
/// validator of their own resolve to a composite over those meta-tags.
#[derive(Clone)]
pub struct ValidatorFactory {
    elements: Elements,
    registrations: Arc<HashMap<String, ValidatorRegistration>>,
}

impl ValidatorFactory {
    /// A factory with every built-in validator registered.
    pub fn new(elements: Elements) -> Self {
        let mut factory = Self {
            elements,
            registrations: Arc::new(HashMap::new()),
        };
        validators::register_builtins(&mut factory);
        factory
    }

    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    pub fn registry(&self) -> &Arc<Registry> {
        self.elements.registry()
    }

    /// Register (or replace) the validator for an identifier.
    pub fn register(&mut self, id: impl Into<String>, registration: ValidatorRegistration) {
        Arc::make_mut(&mut self.registrations).insert(id.into(), registration);
    }

    pub fn registration(&self, id: &str) -> Option<&ValidatorRegistration> {
        self.registrations.get(id)
    }

    fn tag_def(&self, tag: &Tag) -> ConstraintResult<&Arc<TagDef>> {
        self.registry()
            .get_tag(tag.name())
            .ok_or_else(|| ConstraintError::unknown_tag(tag.name()))
    }

    /// Whether nested violations reported for `tag` are merged into the parent result.
    pub fn merges_elements(&self, tag: &Tag) -> bool {
        self.registry()
            .get_tag(tag.name())
            .is_some_and(|def| def.merge_elements)
    }

    /// Whether `tag` is enforced by a validator.
    pub fn is_constraint(&self, tag: &Tag) -> bool {
        self.registry()
            .get_tag(tag.name())
            .is_some_and(|def| def.is_constraint())
    }

    /// The validator enforcing `ctx.tag`, or `None` for marker tags.
    pub fn resolve(&self, ctx: &ValidatorContext<'_>) -> ConstraintResult<Option<Box<dyn Validator>>> {
        let def = self.tag_def(ctx.tag)?;

        if let Some(id) = &def.validator {
            let registration = self
                .registrations
                .get(id)
                .ok_or_else(|| ConstraintError::unknown_validator(ctx.tag.name(), id))?;
            if let Some(missing) = registration.requires.iter().find(|c| !ctx.provides(**c)) {
                return Err(ConstraintError::missing_capability(id, *missing));
            }
            return (registration.build)(ctx).map(Some);
        }

        if def.is_composite() {
            let mut parts = Vec::with_capacity(def.meta_tags.len());
            for meta in &def.meta_tags {
                if let Some(validator) = self.resolve(&ctx.with_tag(meta))? {
                    parts.push(validator);
                }
            }
            debug!(tag = ctx.tag.name(), parts = parts.len(), "composite validator resolved");
            return Ok(Some(Box::new(DomainValidator::new(parts))));
        }

        Ok(None)
    }

    /// Build a validator outside any engine run.
    ///
    /// Only the tag, the factory and a default engine are available, so a
    /// validator requiring a member or target fails with `MissingCapability`.
    pub fn create(&self, tag: &Tag) -> ConstraintResult<Option<Box<dyn Validator>>> {
        let engine = ValidationEngine::unchecked(self.clone(), EngineConfig::default());
        let ctx = ValidatorContext {
            tag,
            member: None,
            target: None,
            engine: &engine,
            factory: self,
        };
        self.resolve(&ctx)
    }

    /// Check that `tag` can be enforced on a member declared as `declared_type`.
    pub(crate) fn check(&self, tag: &Tag, member: &str, declared_type: &TypeDesc) -> ConstraintResult<()> {
        let def = self.tag_def(tag)?;

        if let Some(id) = &def.validator {
            let registration = self
                .registrations
                .get(id)
                .ok_or_else(|| ConstraintError::unknown_validator(tag.name(), id))?;
            if let Some(supports) = registration.supports {
                if !supports(declared_type) {
                    return Err(ConstraintError::UnsupportedShape {
                        tag: tag.name().to_string(),
                        member: member.to_string(),
                        declared_type: declared_type.clone(),
                    });
                }
            }
            if let Some(check_tag) = registration.check_tag {
                check_tag(tag)?;
            }
            return Ok(());
        }

        for meta in &def.meta_tags {
            self.check(meta, member, declared_type)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ValidatorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.registrations.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("ValidatorFactory")
            .field("validators", &ids)
            .finish_non_exhaustive()
    }
}
