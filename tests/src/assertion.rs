//! Expectations on validation outcomes.

use reach_constraint::{ConstraintError, ValidationResult};
use reach_core::Value;
use std::fmt;

use crate::error::{ScenarioError, ScenarioResult};

type Check = Box<dyn Fn(&ValidationResult) -> bool>;

/// What a step's validation outcome must look like.
#[derive(Default)]
pub struct Expect {
    valid: Option<bool>,
    count: Option<usize>,
    /// Paths that must be invalid, with tags that must be among the violated ones.
    invalid: Vec<(String, Vec<String>)>,
    absent: Vec<String>,
    values: Vec<(String, Value)>,
    error: Option<String>,
    custom: Option<Check>,
}

impl fmt::Debug for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expect")
            .field("valid", &self.valid)
            .field("count", &self.count)
            .field("invalid", &self.invalid)
            .field("absent", &self.absent)
            .field("values", &self.values)
            .field("error", &self.error)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Expect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn valid(mut self) -> Self {
        self.valid = Some(true);
        self
    }

    pub fn invalid(mut self) -> Self {
        self.valid = Some(false);
        self
    }

    /// Exactly `n` invalid elements.
    pub fn count(mut self, n: usize) -> Self {
        self.count = Some(n);
        self
    }

    /// An invalid element at `path` violating at least `tags`.
    pub fn at(mut self, path: &str, tags: &[&str]) -> Self {
        self.valid = Some(false);
        self.invalid
            .push((path.to_string(), tags.iter().map(|t| t.to_string()).collect()));
        self
    }

    /// No invalid element at `path`.
    pub fn not_at(mut self, path: &str) -> Self {
        self.absent.push(path.to_string());
        self
    }

    /// The invalid element at `path` carries `value`.
    pub fn value_at(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.values.push((path.to_string(), value.into()));
        self
    }

    /// Validation fails with an error whose message contains `contains`.
    pub fn error(mut self, contains: impl Into<String>) -> Self {
        self.error = Some(contains.into());
        self
    }

    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ValidationResult) -> bool + 'static,
    {
        self.custom = Some(Box::new(f));
        self
    }

    pub fn verify(
        &self,
        step: &str,
        outcome: &Result<ValidationResult, ConstraintError>,
    ) -> ScenarioResult<()> {
        let fail = |message: String| Err(ScenarioError::assertion_failed(step, message));

        if let Some(expected) = &self.error {
            return match outcome {
                Err(e) if e.to_string().contains(expected.as_str()) => Ok(()),
                Err(e) => fail(format!("expected error containing '{}', got: {}", expected, e)),
                Ok(_) => fail(format!(
                    "expected error containing '{}', but validation succeeded",
                    expected
                )),
            };
        }

        let result = match outcome {
            Ok(result) => result,
            Err(e) => return fail(format!("unexpected error: {}", e)),
        };

        if let Some(valid) = self.valid {
            if result.is_valid() != valid {
                return fail(format!(
                    "expected {}, got invalid paths {:?}",
                    if valid { "valid" } else { "invalid" },
                    result.paths()
                ));
            }
        }

        if let Some(n) = self.count {
            if result.len() != n {
                return fail(format!(
                    "expected {} invalid element(s), got {}: {:?}",
                    n,
                    result.len(),
                    result.paths()
                ));
            }
        }

        for (path, tags) in &self.invalid {
            let Some(element) = result.invalid_element(path) else {
                return fail(format!("no invalid element at '{}', got {:?}", path, result.paths()));
            };
            for tag in tags {
                if !element.is_constraint_violated(tag) {
                    return fail(format!("'{}' does not violate @{}", path, tag));
                }
            }
        }

        for path in &self.absent {
            if result.invalid_element(path).is_some() {
                return fail(format!("unexpected invalid element at '{}'", path));
            }
        }

        for (path, value) in &self.values {
            match result.invalid_element(path) {
                Some(element) if element.invalid_value() == value => {}
                Some(element) => {
                    return fail(format!(
                        "'{}' holds {}, expected {}",
                        path,
                        element.invalid_value(),
                        value
                    ))
                }
                None => return fail(format!("no invalid element at '{}'", path)),
            }
        }

        if let Some(check) = &self.custom {
            if !check(result) {
                return fail("custom assertion failed".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_expectation() {
        let outcome = Err(ConstraintError::DepthExceeded { max_depth: 2 });

        assert!(Expect::new().error("depth 2").verify("s", &outcome).is_ok());
        assert!(Expect::new().valid().verify("s", &outcome).is_err());
    }
}
