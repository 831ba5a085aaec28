//! Authentication primitives.
//!
//! Provides the building blocks the identity service composes:
//! - Password hashing (Argon2id) with tunable cost
//! - Claim sets built from ordered, composable options
//! - Signing and verifying JWTs (HS256)
//!
//! Nothing here knows about users, token purposes or account state. Those
//! rules belong to the service that uses this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{PasswordError, PasswordHasher};
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password").is_ok());
//! assert_eq!(hasher.verify(&hash, "nope"), Err(PasswordError::Mismatch));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::jwt::options;
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = options::build([
//!     options::subject("user123"),
//!     options::claim("username", "alice"),
//!     options::lifetime(Duration::hours(24)),
//! ]);
//! let token = issuer.issue(&claims).unwrap();
//! let decoded = issuer.verify(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("user123"));
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::ClaimsOption;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use password::PasswordError;
pub use password::PasswordHasher;
