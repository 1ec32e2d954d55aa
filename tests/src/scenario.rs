//! Scenario runner.

use reach_constraint::{ConstraintResult, ValidationResult};

use crate::assertion::Expect;
use crate::error::ScenarioResult;

type Action<W> = Box<dyn Fn(&W) -> ConstraintResult<ValidationResult>>;

struct Step<W> {
    name: String,
    action: Action<W>,
    expect: Expect,
}

/// A named sequence of steps over one fixture.
///
/// Steps run in order and share the fixture, so a step sees every mutation
/// made by the steps before it.
pub struct Scenario<W> {
    name: String,
    fixture: W,
    steps: Vec<Step<W>>,
}

impl<W> Scenario<W> {
    pub fn new(name: impl Into<String>, fixture: W) -> Self {
        Self {
            name: name.into(),
            fixture,
            steps: Vec::new(),
        }
    }

    /// Add a step. `expect` configures what its outcome must look like.
    pub fn step<F, E>(mut self, name: impl Into<String>, action: F, expect: E) -> Self
    where
        F: Fn(&W) -> ConstraintResult<ValidationResult> + 'static,
        E: FnOnce(Expect) -> Expect,
    {
        self.steps.push(Step {
            name: name.into(),
            action: Box::new(action),
            expect: expect(Expect::new()),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fixture(&self) -> &W {
        &self.fixture
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step, stopping at the first failed expectation.
    pub fn run(&self) -> ScenarioResult<()> {
        for step in &self.steps {
            let outcome = (step.action)(&self.fixture);
            step.expect
                .verify(&format!("{}:{}", self.name, step.name), &outcome)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reach_constraint::ConstraintError;

    #[test]
    fn test_steps_run_in_order() {
        let scenario = Scenario::new("errors", ())
            .step("first", |_| Err(ConstraintError::unknown_tag("x")), |e| e.error("@x"))
            .step("second", |_| Err(ConstraintError::unknown_tag("y")), |e| e.error("@z"));

        assert_eq!(scenario.len(), 2);
        let err = scenario.run().unwrap_err();
        assert!(err.to_string().contains("errors:second"));
    }
}
