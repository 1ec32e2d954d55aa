//! Faults raised by container backends.

use thiserror::Error;

/// An opaque failure raised by a getter, setter or external container.
///
/// Callers above the container layer never see this raw; it is wrapped into
/// a handling failure together with the member that was being accessed.
pub type AccessFault = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Faults raised by the built-in containers.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Sequence index outside the current length.
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Value does not fit the declared slot type.
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Column ordinal outside 1..=count.
    #[error("Column ordinal {ordinal} out of range (1..={count})")]
    ColumnOutOfRange { ordinal: usize, count: usize },

    /// Column label not present in the cursor.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Cursor has not been advanced onto a row.
    #[error("Cursor is not positioned on a row")]
    NoCurrentRow,

    /// Any other failure.
    #[error("{0}")]
    Failed(String),
}

impl AccessError {
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Box this error as an [`AccessFault`].
    pub fn into_fault(self) -> AccessFault {
        Box::new(self)
    }
}
