//! Composable claim options.
//!
//! A token's claim set is built by applying an ordered list of options to an
//! empty [`Claims`]. Each option is a plain `Claims -> Claims` function, so
//! later options overwrite earlier ones that touch the same claim.
//!
//! ```
//! use auth::jwt::options;
//! use chrono::Duration;
//!
//! let passwordless = true;
//! let claims = options::build([
//!     options::subject("42"),
//!     options::claim("purpose", "refresh"),
//!     options::when(!passwordless, vec![options::lifetime(Duration::days(30))]),
//!     options::claim("passwordless", passwordless),
//! ]);
//!
//! assert_eq!(claims.sub.as_deref(), Some("42"));
//! assert!(claims.exp.is_none());
//! ```

use chrono::Duration;
use serde_json::Value;

use super::claims::Claims;

/// A single claim-setting step.
pub type ClaimsOption = Box<dyn FnOnce(Claims) -> Claims + Send>;

/// Set the `sub` claim.
pub fn subject(sub: impl ToString) -> ClaimsOption {
    let sub = sub.to_string();
    Box::new(move |claims| claims.with_subject(sub))
}

/// Set a custom claim.
pub fn claim(key: impl ToString, value: impl Into<Value>) -> ClaimsOption {
    let key = key.to_string();
    let value = value.into();
    Box::new(move |claims| claims.with_extra(key, value))
}

/// Give the token a lifetime; without this option the token has no `exp`.
pub fn lifetime(lifetime: Duration) -> ClaimsOption {
    Box::new(move |claims| claims.with_lifetime(lifetime))
}

/// Apply `options` in order only if `condition` holds.
pub fn when(condition: bool, options: Vec<ClaimsOption>) -> ClaimsOption {
    Box::new(move |claims| {
        if condition {
            apply(claims, options)
        } else {
            claims
        }
    })
}

/// Combine several options into one.
pub fn all(options: Vec<ClaimsOption>) -> ClaimsOption {
    Box::new(move |claims| apply(claims, options))
}

/// Apply options left to right on top of `claims`.
pub fn apply(claims: Claims, options: impl IntoIterator<Item = ClaimsOption>) -> Claims {
    options.into_iter().fold(claims, |claims, option| option(claims))
}

/// Build a fresh claim set from options.
pub fn build(options: impl IntoIterator<Item = ClaimsOption>) -> Claims {
    apply(Claims::new(), options)
}
