//! Error types for account and session operations

use thiserror::Error;

/// Account and session specific errors
#[derive(Debug, Error)]
pub enum AccountError {
    /// An account already exists for this identity or username
    #[error("This user already exists. Please try logging in.")]
    AlreadyExists,

    /// Credentials did not match. Deliberately ambiguous: the caller must
    /// not learn which field was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// OTP verification failed. Unknown email, expired code and wrong code
    /// all collapse into this variant.
    #[error("Invalid or expired OTP")]
    InvalidOrExpired,

    /// Operation requires a verified session
    #[error("Please verify your email first")]
    NotLoggedIn,

    /// No account matches the given lookup key
    #[error("No account found")]
    NotFound,

    /// Transactional mail could not be sent
    #[error("Failed to send notification: {0}")]
    NotificationFailure(String),

    /// Password hashing failed
    #[error("Password hashing error: {0}")]
    HashError(String),

    /// Credential store access failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Result type alias for account operations
pub type Result<T> = std::result::Result<T, AccountError>;
