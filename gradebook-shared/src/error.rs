/// Domain errors for the gradebook core
///
/// Every variant except `Storage` and `Password` is an expected, user-correctable
/// condition. Callers surface them directly; nothing here is retried.
use crate::auth::password::PasswordError;

/// Result alias used by the store and service layers
pub type RecordResult<T> = Result<T, RecordError>;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// A required field was missing or blank after trimming
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Roll number already exists")]
    DuplicateRoll,

    #[error("User not found")]
    UserNotFound,

    /// No student with the requested roll
    #[error("Student not found")]
    NotFound,

    #[error("Invalid password")]
    InvalidPassword,

    /// Password hashing or hash parsing failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Underlying datastore failure
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
