//! The validator plug-in contract.

use crate::{ConstraintResult, InvalidElement, ValidationEngine, ValidatorFactory};
use reach_core::{Tag, TypeDesc, Value};
use reach_element::Member;
use std::fmt;
use std::sync::Arc;

/// Outcome of checking one value.
#[derive(Debug, Clone)]
pub enum Verdict {
    Valid,
    Invalid,
    /// Invalid, with violations found inside the value. Paths are relative to it.
    Nested(Vec<InvalidElement>),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl From<bool> for Verdict {
    fn from(valid: bool) -> Self {
        if valid {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

/// Checks values against one tag instance.
///
/// Null is a first-class input. Apart from `not_null`, the built-ins accept it.
pub trait Validator {
    fn check(&self, value: &Value) -> ConstraintResult<Verdict>;

    fn is_valid(&self, value: &Value) -> ConstraintResult<bool> {
        Ok(self.check(value)?.is_valid())
    }
}

impl<F> Validator for F
where
    F: Fn(&Value) -> ConstraintResult<bool>,
{
    fn check(&self, value: &Value) -> ConstraintResult<Verdict> {
        self(value).map(Verdict::from)
    }
}

/// Something a validator may need at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// The tag instance being enforced.
    Tag,
    /// The bound member under validation.
    Member,
    /// The container the running validation was started on.
    Target,
    /// The engine currently running, for recursion.
    Engine,
    /// The factory, for validators composing other tags.
    Factory,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Tag => "tag",
            Capability::Member => "member",
            Capability::Target => "target",
            Capability::Engine => "engine",
            Capability::Factory => "factory",
        };
        f.write_str(name)
    }
}

/// What is on hand when a validator is built.
#[derive(Clone, Copy)]
pub struct ValidatorContext<'a> {
    pub tag: &'a Tag,
    pub member: Option<&'a Member>,
    pub target: Option<&'a Value>,
    pub engine: &'a ValidationEngine,
    pub factory: &'a ValidatorFactory,
}

impl<'a> ValidatorContext<'a> {
    pub fn provides(&self, capability: Capability) -> bool {
        match capability {
            Capability::Tag | Capability::Engine | Capability::Factory => true,
            Capability::Member => self.member.is_some(),
            Capability::Target => self.target.is_some(),
        }
    }

    /// The same context enforcing another tag.
    pub fn with_tag<'b>(&self, tag: &'b Tag) -> ValidatorContext<'b>
    where
        'a: 'b,
    {
        ValidatorContext {
            tag,
            member: self.member,
            target: self.target,
            engine: self.engine,
            factory: self.factory,
        }
    }
}

impl fmt::Debug for ValidatorContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorContext")
            .field("tag", &self.tag.name())
            .field("member", &self.member.map(Member::name))
            .field("target", &self.target.map(Value::type_name))
            .finish()
    }
}

pub type BuildValidator =
    Arc<dyn Fn(&ValidatorContext<'_>) -> ConstraintResult<Box<dyn Validator>> + Send + Sync>;

/// How the factory builds one kind of validator.
#[derive(Clone)]
pub struct ValidatorRegistration {
    pub(crate) build: BuildValidator,
    pub(crate) requires: Vec<Capability>,
    pub(crate) supports: Option<fn(&TypeDesc) -> bool>,
    pub(crate) check_tag: Option<fn(&Tag) -> ConstraintResult<()>>,
}

impl ValidatorRegistration {
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(&ValidatorContext<'_>) -> ConstraintResult<Box<dyn Validator>> + Send + Sync + 'static,
    {
        Self {
            build: Arc::new(build),
            requires: Vec::new(),
            supports: None,
            check_tag: None,
        }
    }

    /// Fail resolution unless `capability` is on hand.
    pub fn requires(mut self, capability: Capability) -> Self {
        if !self.requires.contains(&capability) {
            self.requires.push(capability);
        }
        self
    }

    /// Restrict the member types this validator may be declared on.
    pub fn supports(mut self, supports: fn(&TypeDesc) -> bool) -> Self {
        self.supports = Some(supports);
        self
    }

    /// Check tag parameters once, when an engine is constructed.
    pub fn checking(mut self, check: fn(&Tag) -> ConstraintResult<()>) -> Self {
        self.check_tag = Some(check);
        self
    }

    pub fn required(&self) -> &[Capability] {
        &self.requires
    }
}

impl fmt::Debug for ValidatorRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistration")
            .field("requires", &self.requires)
            .field("supports", &self.supports.is_some())
            .field("check_tag", &self.check_tag.is_some())
            .finish()
    }
}
