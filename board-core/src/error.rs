//! Error types for board operations.

use thiserror::Error;

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors that can occur in board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Element not found on the board.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Two elements share the same identifier.
    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    /// A gesture session is already running.
    #[error("Gesture already active: {0}")]
    GestureActive(&'static str),

    /// Unlock attempted with the wrong secret.
    #[error("Wrong secret for element: {0}")]
    WrongSecret(String),

    /// Lock operation on an element that carries no secret.
    #[error("Element is not protected: {0}")]
    NotProtected(String),

    /// Configuration values that cannot be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
