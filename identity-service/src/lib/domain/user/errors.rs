use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for credential hashing and verification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("No password set")]
    MissingDigest,

    #[error("Stored password digest is malformed: {0}")]
    MalformedDigest(String),

    #[error("Password does not match")]
    Mismatch,
}

impl From<auth::PasswordError> for PasswordError {
    fn from(err: auth::PasswordError) -> Self {
        match err {
            auth::PasswordError::HashingFailed(msg) | auth::PasswordError::InvalidParams(msg) => {
                PasswordError::HashingFailed(msg)
            }
            auth::PasswordError::MissingDigest => PasswordError::MissingDigest,
            auth::PasswordError::MalformedDigest(msg) => PasswordError::MalformedDigest(msg),
            auth::PasswordError::Mismatch => PasswordError::Mismatch,
        }
    }
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid name: {0}")]
    InvalidDisplayName(#[from] DisplayNameError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Database operation timed out after {0} ms")]
    DatabaseTimeout(u128),
}
