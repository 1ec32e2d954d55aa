//! Reach Core Types
//!
//! This crate provides the foundational types used throughout Reach:
//! - Type identifiers (TypeId) and type descriptors (TypeDesc)
//! - Value types (the Value enum with all scalar and container types)
//! - Container instances (objects, lists, maps, property stores, row cursors)
//! - Metadata tag instances
//! - Access fault types raised by container backends

mod container;
mod error;
mod id;
mod tag;
mod types;
mod value;

pub use container::*;
pub use error::*;
pub use id::*;
pub use tag::*;
pub use types::*;
pub use value::*;
