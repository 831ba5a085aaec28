use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// Stored digest is empty: the account has no password.
    #[error("No password digest set")]
    MissingDigest,

    #[error("Malformed password digest: {0}")]
    MalformedDigest(String),

    #[error("Password does not match")]
    Mismatch,
}
