use std::fmt;
use std::str::FromStr;

use auth::Claims;
use chrono::Duration;

use crate::domain::session::errors::SessionError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

pub const ACCESS_TOKEN_HOURS: i64 = 24;
pub const REFRESH_TOKEN_DAYS: i64 = 30;

pub fn access_token_lifetime() -> Duration {
    Duration::hours(ACCESS_TOKEN_HOURS)
}

pub fn refresh_token_lifetime() -> Duration {
    Duration::days(REFRESH_TOKEN_DAYS)
}

/// Which flow a token may be presented to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
    Authorize,
    Refresh,
    Invite,
}

impl Purpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Authorize => "authorize",
            Purpose::Refresh => "refresh",
            Purpose::Invite => "invite",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "authorize" => Ok(Purpose::Authorize),
            "refresh" => Ok(Purpose::Refresh),
            "invite" => Ok(Purpose::Invite),
            _ => Err(SessionError::Unauthorized),
        }
    }
}

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of creating a passwordless account: the account plus credentials
/// to use it, since it cannot log in by password.
#[derive(Debug, Clone)]
pub struct PasswordlessAccount {
    pub user: User,
    pub tokens: TokenPair,
}

/// Typed view over a verified token's claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: UserId,
    pub username: String,
    pub purpose: Purpose,
    /// Only meaningful on refresh tokens; absent reads as false.
    pub passwordless: bool,
}

pub mod claim_names {
    pub const USERNAME: &str = "username";
    pub const PURPOSE: &str = "purpose";
    pub const PASSWORDLESS: &str = "passwordless";
}

impl TryFrom<&Claims> for SessionClaims {
    type Error = SessionError;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        let user_id = claims
            .sub
            .as_deref()
            .ok_or(SessionError::Unauthorized)
            .and_then(|sub| UserId::from_string(sub).map_err(|_| SessionError::Unauthorized))?;

        let username = claims
            .extra_str(claim_names::USERNAME)
            .ok_or(SessionError::Unauthorized)?
            .to_string();

        let purpose = claims
            .extra_str(claim_names::PURPOSE)
            .ok_or(SessionError::Unauthorized)?
            .parse()?;

        let passwordless = claims
            .extra_bool(claim_names::PASSWORDLESS)
            .unwrap_or(false);

        Ok(Self {
            user_id,
            username,
            purpose,
            passwordless,
        })
    }
}
