use crate::{ConstraintError, ConstraintResult, Validator, Verdict};
use reach_core::Value;
use reach_registry::builtin;

/// Invalid iff the value is null.
#[derive(Debug, Clone, Copy)]
pub struct NotNull;

impl Validator for NotNull {
    fn check(&self, value: &Value) -> ConstraintResult<Verdict> {
        Ok((!value.is_null()).into())
    }
}

/// Strings and collections must have at least one element. Null passes.
#[derive(Debug, Clone, Copy)]
pub struct NotEmpty;

impl Validator for NotEmpty {
    fn check(&self, value: &Value) -> ConstraintResult<Verdict> {
        let empty = match value {
            Value::Null => false,
            Value::String(s) => s.is_empty(),
            Value::List(list) => list.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Properties(properties) => properties.is_empty(),
            other => {
                return Err(ConstraintError::unsupported_value(
                    builtin::NOT_EMPTY,
                    other.type_name(),
                ))
            }
        };
        Ok((!empty).into())
    }
}
