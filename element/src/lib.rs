//! Reach Elements
//!
//! Uniform member access over heterogeneous containers:
//! - Member handles, unbound (templates) or bound to a target
//! - Container adapters for objects, tags, lists, maps, property stores and row cursors
//! - A per-type member cache
//! - Selectors with composable predicates and dotted paths
//! - A copy engine pairing members by name

mod adapter;
mod cache;
mod copy;
mod elements;
mod error;
mod member;
mod path;
pub mod predicate;
mod selector;

pub use cache::{MemberCache, TypeMembers};
pub use copy::{Copier, CopyFilter, CopyOptions, ElementCopy, ValueTransform};
pub use elements::Elements;
pub use error::{ElementError, ElementResult};
pub use member::{Member, MemberAccess, MemberDescriptor};
pub use predicate::MemberPredicate;
pub use selector::Selector;
