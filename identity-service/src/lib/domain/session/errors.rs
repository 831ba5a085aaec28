use thiserror::Error;

use crate::user::errors::UserError;

/// Outcome of a failed session flow.
///
/// Every credential, token and "no such user" failure is the same
/// `Unauthorized` so callers cannot tell which check failed. `Internal`
/// carries detail for logs only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for SessionError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(username) => {
                SessionError::UsernameAlreadyExists(username)
            }
            other => SessionError::Internal(other.to_string()),
        }
    }
}

impl From<auth::JwtError> for SessionError {
    fn from(err: auth::JwtError) -> Self {
        if err.is_invalid() {
            SessionError::Unauthorized
        } else {
            SessionError::Internal(err.to_string())
        }
    }
}
