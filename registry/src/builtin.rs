//! Built-in tag definitions.
//!
//! Constraint tags name a validator of the same name; the constraint crate
//! registers an implementation for each of them.

use crate::RegistryBuilder;
use reach_core::TypeDesc;

pub const NOT_NULL: &str = "not_null";
pub const NOT_EMPTY: &str = "not_empty";
pub const MIN: &str = "min";
pub const MAX: &str = "max";
pub const LENGTH: &str = "length";
pub const PATTERN: &str = "pattern";
pub const VALID: &str = "valid";
pub const VALIDS: &str = "valids";
/// Marker tag with no validator.
pub const FLAG: &str = "flag";

/// Register every built-in tag on `builder`.
pub(crate) fn register(builder: &mut RegistryBuilder) {
    // Names are unique and parameters well-typed, so registration cannot fail.
    let results = [
        builder.add_tag(NOT_NULL).validator(NOT_NULL).done(),
        builder.add_tag(NOT_EMPTY).validator(NOT_EMPTY).done(),
        builder
            .add_tag(MIN)
            .param("value", TypeDesc::Float)
            .param_default("delta", TypeDesc::Float, 0.0)
            .param_default("inclusive", TypeDesc::Bool, true)
            .validator(MIN)
            .done(),
        builder
            .add_tag(MAX)
            .param("value", TypeDesc::Float)
            .param_default("delta", TypeDesc::Float, 0.0)
            .param_default("inclusive", TypeDesc::Bool, true)
            .validator(MAX)
            .done(),
        builder
            .add_tag(LENGTH)
            .param_default("min", TypeDesc::Int, 0i64)
            .param_default("max", TypeDesc::Int, i64::MAX)
            .param_default("trim", TypeDesc::Bool, false)
            .validator(LENGTH)
            .done(),
        builder
            .add_tag(PATTERN)
            .param("regex", TypeDesc::String)
            .validator(PATTERN)
            .done(),
        builder.add_tag(VALID).validator(VALID).merge_elements().done(),
        builder.add_tag(VALIDS).validator(VALIDS).merge_elements().done(),
        builder.add_tag(FLAG).done(),
    ];
    debug_assert!(results.iter().all(Result::is_ok));
}
