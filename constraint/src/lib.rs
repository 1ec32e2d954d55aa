//! Reach Constraint
//!
//! Validate containers against the constraint tags declared on their members.
//!
//! Responsibilities:
//! - Resolve constraint tags to validators, including composite tags
//! - Run validators against member values, recursing into nested containers
//! - Report every violation with its path, member and offending value

mod engine;
mod error;
mod factory;
mod result;
mod validator;
pub mod validators;

pub use engine::{EngineConfig, ValidationEngine};
pub use error::{ConstraintError, ConstraintResult};
pub use factory::ValidatorFactory;
pub use result::{InvalidElement, ValidationResult};
pub use validator::{
    BuildValidator, Capability, Validator, ValidatorContext, ValidatorRegistration, Verdict,
};
