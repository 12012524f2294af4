//! Error types for the sprintboard-protocol crate.
//!
//! This module defines all error types that can occur when working with
//! protocol types, including serialization failures and queue operations.

use thiserror::Error;

use crate::task::TaskId;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Failed to serialize a protocol type to JSON.
    #[error("failed to serialize to JSON: {0}")]
    SerializationFailed(#[source] serde_json::Error),

    /// Failed to deserialize a protocol type from JSON.
    #[error("failed to deserialize from JSON: {0}")]
    DeserializationFailed(#[source] serde_json::Error),

    /// A task with the given ID is not in the queue.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A task cannot be ranked under itself.
    #[error("task {0} cannot be ranked under itself")]
    SelfRank(TaskId),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ProtocolError::TaskNotFound(17);
        assert_eq!(err.to_string(), "task not found: 17");

        let err = ProtocolError::SelfRank(3);
        assert_eq!(err.to_string(), "task 3 cannot be ranked under itself");
    }
}
