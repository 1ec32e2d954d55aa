//! Constraint error types.

use crate::Capability;
use reach_core::TypeDesc;
use reach_element::ElementError;
use thiserror::Error;

/// Result type for constraint operations.
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Errors raised while resolving validators or running validation.
///
/// Violations are never errors; they are reported in a `ValidationResult`.
#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("Unknown tag: @{name}")]
    UnknownTag { name: String },

    #[error("Unknown validator '{validator}' declared by @{tag}")]
    UnknownValidator { tag: String, validator: String },

    #[error("Validator '{validator}' requires the {capability} capability")]
    MissingCapability {
        validator: String,
        capability: Capability,
    },

    #[error("@{tag} does not support {declared_type} (member '{member}')")]
    UnsupportedShape {
        tag: String,
        member: String,
        declared_type: TypeDesc,
    },

    #[error("Validator '{validator}' cannot check a {value_type} value")]
    UnsupportedValue {
        validator: String,
        value_type: String,
    },

    #[error("@{tag} is missing parameter '{param}'")]
    MissingParam { tag: String, param: String },

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Nested validation exceeded depth {max_depth}")]
    DepthExceeded { max_depth: usize },

    #[error(transparent)]
    Element(#[from] ElementError),
}

impl ConstraintError {
    pub fn unknown_tag(name: impl Into<String>) -> Self {
        Self::UnknownTag { name: name.into() }
    }

    pub fn unknown_validator(tag: impl Into<String>, validator: impl Into<String>) -> Self {
        Self::UnknownValidator {
            tag: tag.into(),
            validator: validator.into(),
        }
    }

    pub fn missing_capability(validator: impl Into<String>, capability: Capability) -> Self {
        Self::MissingCapability {
            validator: validator.into(),
            capability,
        }
    }

    pub fn unsupported_value(validator: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            validator: validator.into(),
            value_type: value_type.into(),
        }
    }

    pub fn missing_param(tag: impl Into<String>, param: impl Into<String>) -> Self {
        Self::MissingParam {
            tag: tag.into(),
            param: param.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}
