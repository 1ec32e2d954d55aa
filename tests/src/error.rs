//! Scenario errors.

use reach_constraint::ConstraintError;
use reach_element::ElementError;
use reach_registry::RegistryError;
use thiserror::Error;

pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Step '{step}' failed: {message}")]
    AssertionFailed { step: String, message: String },

    #[error("Fixture error: {0}")]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Element(#[from] ElementError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

impl ScenarioError {
    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }
}
