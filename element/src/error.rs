//! Element error types.

use reach_core::AccessFault;
use thiserror::Error;

/// Result type for element operations.
pub type ElementResult<T> = Result<T, ElementError>;

/// Errors that can occur while resolving or accessing members.
#[derive(Debug, Error)]
pub enum ElementError {
    #[error("Member '{name}' is not readable")]
    Unreadable { name: String },

    #[error("Member '{name}' is not writable")]
    Unwritable { name: String },

    #[error("Member '{name}' is not bound to a target")]
    NonSpecific { name: String },

    #[error("Failed to handle member '{member}': {source}")]
    Handling {
        member: String,
        #[source]
        source: AccessFault,
    },

    #[error("Unknown type: {name}")]
    UnknownType { name: String },

    #[error("Ambiguous query: {count} members match")]
    Ambiguous { count: usize },

    #[error("{type_name} values have no members")]
    NotAContainer { type_name: String },
}

impl ElementError {
    pub fn unreadable(name: impl Into<String>) -> Self {
        Self::Unreadable { name: name.into() }
    }

    pub fn unwritable(name: impl Into<String>) -> Self {
        Self::Unwritable { name: name.into() }
    }

    pub fn non_specific(name: impl Into<String>) -> Self {
        Self::NonSpecific { name: name.into() }
    }

    pub fn handling(member: impl Into<String>, source: AccessFault) -> Self {
        Self::Handling {
            member: member.into(),
            source,
        }
    }

    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    pub fn not_a_container(type_name: impl Into<String>) -> Self {
        Self::NotAContainer {
            type_name: type_name.into(),
        }
    }
}
