//! Reach Registry
//!
//! Immutable lookup of structured-object types and metadata tag types.
//! Types declare fields, accessors and mutators; tags declare parameters,
//! an optional validator and optional meta tags for domain composition.

pub mod builtin;
mod builder;
mod registry;
mod types;

pub use builder::{RegistryBuilder, RegistryError, TagBuilder, TypeBuilder};
pub use registry::Registry;
pub use types::*;
