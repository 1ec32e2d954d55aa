//! The validation engine.

use crate::{
    ConstraintError, ConstraintResult, InvalidElement, ValidationResult, ValidatorContext,
    ValidatorFactory, Verdict,
};
use reach_core::{TypeDesc, Value};
use reach_element::{ElementError, Elements, Member, MemberPredicate};
use tracing::{debug, trace};

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Validate members inherited from ancestor types.
    pub deep: bool,
    /// Maximum nesting of recursive validation.
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            deep: true,
            max_depth: 32,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Validates containers against the constraint tags on their members.
///
/// Cloning is cheap. Validators receive the engine that is running and recurse
/// through [`ValidationEngine::nested`], which keeps the active filter.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    factory: ValidatorFactory,
    filter: Option<MemberPredicate>,
    config: EngineConfig,
    depth: usize,
}

impl ValidationEngine {
    /// An engine over every type in the factory's registry.
    ///
    /// Fails if any member carries a tag that cannot be enforced on it.
    pub fn new(factory: ValidatorFactory) -> ConstraintResult<Self> {
        Self::with_config(factory, EngineConfig::default())
    }

    pub fn with_config(factory: ValidatorFactory, config: EngineConfig) -> ConstraintResult<Self> {
        let engine = Self::unchecked(factory, config);
        let checked = engine.check_registry()?;
        debug!(members = checked, "validation engine ready");
        Ok(engine)
    }

    pub(crate) fn unchecked(factory: ValidatorFactory, config: EngineConfig) -> Self {
        Self {
            factory,
            filter: None,
            config,
            depth: 0,
        }
    }

    /// Pre-resolve every tag on every member of every registered type.
    fn check_registry(&self) -> ConstraintResult<usize> {
        let mut checked = 0;
        for def in self.factory.registry().all_types() {
            let members = self
                .elements()
                .members_of_type(&TypeDesc::object(&def.name), false)?;
            for member in &members {
                for tag in member.tags() {
                    self.factory.check(tag, member.name(), member.declared_type())?;
                }
            }
            checked += members.len();
        }
        Ok(checked)
    }

    pub fn factory(&self) -> &ValidatorFactory {
        &self.factory
    }

    pub fn elements(&self) -> &Elements {
        self.factory.elements()
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Current nesting level; zero for a top-level run.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// An engine validating only members accepted by `predicate`. Replaces any
    /// previous filter.
    pub fn filter(&self, predicate: MemberPredicate) -> Self {
        Self {
            filter: Some(predicate),
            ..self.clone()
        }
    }

    pub fn unfiltered(&self) -> Self {
        Self {
            filter: None,
            ..self.clone()
        }
    }

    /// The engine for one level of recursion.
    pub fn nested(&self) -> ConstraintResult<Self> {
        if self.depth >= self.config.max_depth {
            return Err(ConstraintError::DepthExceeded {
                max_depth: self.config.max_depth,
            });
        }
        Ok(Self {
            depth: self.depth + 1,
            ..self.clone()
        })
    }

    /// Validate every member of a container.
    pub fn validate(&self, target: &Value) -> ConstraintResult<ValidationResult> {
        let members = self.elements().members_of(target, self.config.deep)?;
        let mut result = ValidationResult::new(target.clone());
        for member in &members {
            if let Some(filter) = &self.filter {
                if !filter.test(member) {
                    trace!(member = member.name(), "filtered out");
                    continue;
                }
            }
            self.check_member(member, target, &mut result)?;
        }
        debug!(
            target = %target.type_desc(),
            depth = self.depth,
            invalid = result.len(),
            "validated"
        );
        Ok(result)
    }

    /// Validate a single bound member.
    pub fn validate_member(&self, member: &Member) -> ConstraintResult<ValidationResult> {
        let target = member
            .target()
            .ok_or_else(|| ElementError::non_specific(member.name()))?;
        let mut result = ValidationResult::new(target.clone());
        self.check_member(member, target, &mut result)?;
        Ok(result)
    }

    fn check_member(
        &self,
        member: &Member,
        target: &Value,
        result: &mut ValidationResult,
    ) -> ConstraintResult<()> {
        if !member.tags().iter().any(|t| self.factory.is_constraint(t)) {
            return Ok(());
        }
        if !member.is_readable() {
            trace!(member = member.name(), "write-only, not validated");
            return Ok(());
        }

        let value = member.read_in(target)?;
        let mut violated = Vec::new();
        for tag in member.tags() {
            let ctx = ValidatorContext {
                tag,
                member: Some(member),
                target: Some(target),
                engine: self,
                factory: &self.factory,
            };
            let Some(validator) = self.factory.resolve(&ctx)? else {
                continue;
            };
            match validator.check(&value)? {
                Verdict::Valid => {}
                Verdict::Invalid => violated.push(tag.clone()),
                Verdict::Nested(nested) => {
                    violated.push(tag.clone());
                    if self.factory.merges_elements(tag) {
                        for element in nested {
                            result.insert(element.prefixed(member.name()));
                        }
                    }
                }
            }
        }

        trace!(member = member.name(), violated = violated.len(), "checked");
        if !violated.is_empty() {
            result.insert(InvalidElement::new(member.clone(), value, violated));
        }
        Ok(())
    }
}
