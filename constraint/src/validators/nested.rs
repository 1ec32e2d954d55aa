//! Validators that run the engine on nested values.
//!
//! Scalars have no members, so they are always valid here.

use crate::{ConstraintResult, ValidationEngine, Validator, Verdict};
use reach_core::Value;
use tracing::trace;

/// Validates the value itself as a container.
#[derive(Debug, Clone)]
pub struct Valid {
    engine: ValidationEngine,
}

impl Valid {
    pub fn new(engine: ValidationEngine) -> Self {
        Self { engine }
    }
}

impl Validator for Valid {
    fn check(&self, value: &Value) -> ConstraintResult<Verdict> {
        if value.is_null() {
            return Ok(Verdict::Valid);
        }
        if value.container_kind().is_none() {
            trace!(value_type = value.type_name(), "scalar has no members");
            return Ok(Verdict::Valid);
        }
        let result = self.engine.nested()?.validate(value)?;
        if result.is_valid() {
            Ok(Verdict::Valid)
        } else {
            Ok(Verdict::Nested(result.into_elements()))
        }
    }
}

/// Validates every item of a list or map. Items are reported under their
/// index or key.
#[derive(Debug, Clone)]
pub struct Valids {
    engine: ValidationEngine,
}

impl Valids {
    pub fn new(engine: ValidationEngine) -> Self {
        Self { engine }
    }
}

impl Validator for Valids {
    fn check(&self, value: &Value) -> ConstraintResult<Verdict> {
        match value {
            Value::List(_) | Value::Map(_) => {}
            _ => return Ok(Verdict::Valid),
        }

        let nested = self.engine.nested()?;
        let mut invalid = Vec::new();
        for item in self.engine.elements().members_of(value, false)? {
            let item_value = item.value()?;
            if item_value.container_kind().is_none() {
                continue;
            }
            let result = nested.validate(&item_value)?;
            invalid.extend(result.into_elements().into_iter().map(|e| e.prefixed(item.name())));
        }

        if invalid.is_empty() {
            Ok(Verdict::Valid)
        } else {
            Ok(Verdict::Nested(invalid))
        }
    }
}
