//! Error types for queue operations

use qring_link::StorageError;
use thiserror::Error;

/// A queue operation could not obtain memory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// Every slot of a fixed-capacity arena is occupied.
    #[error("Node storage is full")]
    StorageFull,

    /// The element's text buffer could not be allocated.
    #[error("Failed to allocate {bytes} bytes for element text")]
    Text {
        /// Length of the text being copied.
        bytes: usize,
    },

    /// The node arena itself could not be created.
    #[error("Storage allocation failed: {0}")]
    Storage(#[from] StorageError),
}

/// Queue error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// Memory for the operation could not be obtained.
    #[error(transparent)]
    Allocation(#[from] AllocError),

    /// The operation needs an element but the queue is empty.
    #[error("Invalid operation: {0}")]
    InvalidOperation(&'static str),
}

impl From<StorageError> for QueueError {
    fn from(err: StorageError) -> Self {
        Self::Allocation(err.into())
    }
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
