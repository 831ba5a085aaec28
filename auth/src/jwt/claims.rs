use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Generic JWT claim set.
///
/// Registered claims the issuer cares about are typed fields; everything
/// else lives in `extra` and is flattened into the token payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user/entity identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp). Absent means the token never expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set a custom field, replacing any previous value under `key`.
    pub fn with_extra(mut self, key: impl ToString, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Stamp `iat` with the current time and `exp` with `iat + lifetime`.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        let now = Utc::now().timestamp();
        self.iat = Some(now);
        self.exp = Some(now + lifetime.num_seconds());
        self
    }

    /// Get a custom string field.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    /// Get a custom boolean field.
    pub fn extra_bool(&self, key: &str) -> Option<bool> {
        self.extra.get(key).and_then(Value::as_bool)
    }

    /// Seconds between `iat` and `exp`, if both are present.
    pub fn lifetime_seconds(&self) -> Option<i64> {
        Some(self.exp? - self.iat?)
    }
}
