//! Reach scenario tests.
//!
//! A scenario is a named sequence of steps run against one fixture. Each step
//! mutates the fixture, validates something, and checks the outcome against
//! an [`Expect`](assertion::Expect).

pub mod assertion;
pub mod error;
pub mod fixtures;
pub mod scenario;

pub mod prelude {
    pub use crate::assertion::Expect;
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::fixtures::{self, Shop};
    pub use crate::scenario::Scenario;
    pub use reach_constraint::{
        ConstraintError, EngineConfig, ValidationEngine, ValidationResult, ValidatorFactory,
    };
    pub use reach_core::{properties, ListRef, MapRef, RowSet, Tag, TypeDesc, Value};
    pub use reach_element::{predicate, ElementError, Elements, Member};
    pub use reach_registry::builtin;
}
