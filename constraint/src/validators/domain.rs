use crate::{ConstraintResult, Validator, Verdict};
use reach_core::Value;

/// Enforces every constraint declared on a composite tag, in order.
///
/// The first verdict that is not valid is returned as is.
pub struct DomainValidator {
    parts: Vec<Box<dyn Validator>>,
}

impl DomainValidator {
    pub fn new(parts: Vec<Box<dyn Validator>>) -> Self {
        Self { parts }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl Validator for DomainValidator {
    fn check(&self, value: &Value) -> ConstraintResult<Verdict> {
        for part in &self.parts {
            let verdict = part.check(value)?;
            if !verdict.is_valid() {
                return Ok(verdict);
            }
        }
        Ok(Verdict::Valid)
    }
}
