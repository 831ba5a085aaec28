use thiserror::Error;

/// Error type for JWT operations.
///
/// Everything except `EncodingFailed` is the "invalid token" kind: callers
/// that gate access on a token should treat those variants alike.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}

impl JwtError {
    /// True for signature, structure and expiry failures.
    pub fn is_invalid(&self) -> bool {
        !matches!(self, JwtError::EncodingFailed(_))
    }
}
