//! Built-in validators.

mod domain;
mod nested;
mod null;
mod range;
mod text;

pub use domain::DomainValidator;
pub use nested::{Valid, Valids};
pub use null::{NotEmpty, NotNull};
pub use range::{Bound, BoundKind};
pub use text::{Length, Pattern};

use crate::{Capability, ConstraintError, ConstraintResult, ValidatorFactory, ValidatorRegistration};
use reach_core::{Tag, TypeDesc};
use reach_registry::builtin;

pub(crate) fn register_builtins(factory: &mut ValidatorFactory) {
    factory.register(
        builtin::NOT_NULL,
        ValidatorRegistration::new(|_| Ok(Box::new(NotNull))),
    );
    factory.register(
        builtin::NOT_EMPTY,
        ValidatorRegistration::new(|_| Ok(Box::new(NotEmpty))).supports(sized),
    );
    factory.register(
        builtin::MIN,
        ValidatorRegistration::new(|ctx| Ok(Box::new(Bound::from_tag(BoundKind::Min, ctx.tag)?)))
            .supports(numeric),
    );
    factory.register(
        builtin::MAX,
        ValidatorRegistration::new(|ctx| Ok(Box::new(Bound::from_tag(BoundKind::Max, ctx.tag)?)))
            .supports(numeric),
    );
    factory.register(
        builtin::LENGTH,
        ValidatorRegistration::new(|ctx| Ok(Box::new(Length::from_tag(ctx.tag))))
            .supports(sized),
    );
    factory.register(
        builtin::PATTERN,
        ValidatorRegistration::new(|ctx| Ok(Box::new(Pattern::from_tag(ctx.tag)?)))
            .supports(text)
            .checking(check_pattern),
    );
    factory.register(
        builtin::VALID,
        ValidatorRegistration::new(|ctx| Ok(Box::new(Valid::new(ctx.engine.clone()))))
            .requires(Capability::Engine)
            .supports(nestable),
    );
    factory.register(
        builtin::VALIDS,
        ValidatorRegistration::new(|ctx| Ok(Box::new(Valids::new(ctx.engine.clone()))))
            .requires(Capability::Engine)
            .supports(iterable),
    );
}

fn numeric(t: &TypeDesc) -> bool {
    matches!(t, TypeDesc::Int | TypeDesc::Float | TypeDesc::Any)
}

fn text(t: &TypeDesc) -> bool {
    matches!(t, TypeDesc::String | TypeDesc::Any)
}

fn sized(t: &TypeDesc) -> bool {
    matches!(
        t,
        TypeDesc::String | TypeDesc::List(_) | TypeDesc::Map(_) | TypeDesc::Properties | TypeDesc::Any
    )
}

fn nestable(t: &TypeDesc) -> bool {
    *t == TypeDesc::Any || t.is_container()
}

/// Lists and maps whose items may hold members.
fn iterable(t: &TypeDesc) -> bool {
    match t {
        TypeDesc::List(item) | TypeDesc::Map(item) => nestable(item),
        TypeDesc::Any => true,
        _ => false,
    }
}

fn check_pattern(tag: &Tag) -> ConstraintResult<()> {
    Pattern::from_tag(tag).map(|_| ())
}

fn required_number(tag: &Tag, param: &str) -> ConstraintResult<f64> {
    tag.number(param)
        .ok_or_else(|| ConstraintError::missing_param(tag.name(), param))
}
