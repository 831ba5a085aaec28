use async_trait::async_trait;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::PasswordlessAccount;
use crate::domain::session::models::Purpose;
use crate::domain::session::models::SessionClaims;
use crate::domain::session::models::TokenPair;
use crate::domain::user::models::CreatePasswordlessUserCommand;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::user::models::Username;

/// Port for account creation, login and token refresh.
#[async_trait]
pub trait AuthSessionPort: Send + Sync + 'static {
    /// Create a password-protected account. The caller logs in separately.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Internal` - Hashing or storage failed
    async fn create_account(&self, command: CreateUserCommand) -> Result<User, SessionError>;

    /// Create a passwordless account and mint its first token pair.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Internal` - Storage or signing failed
    async fn create_passwordless_account(
        &self,
        command: CreatePasswordlessUserCommand,
    ) -> Result<PasswordlessAccount, SessionError>;

    /// Exchange a username and password for a token pair.
    ///
    /// # Errors
    /// * `Unauthorized` - Unknown user, wrong password, or passwordless account
    /// * `Internal` - Storage or signing failed
    async fn login(&self, username: &Username, password: &str) -> Result<TokenPair, SessionError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, not a refresh token, user gone, or the
    ///   token was minted passwordless and the account now has a password
    /// * `Internal` - Storage or signing failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, SessionError>;

    /// Verify a token and check it was issued for `purpose`.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired, malformed, or for another purpose
    fn verify_token(&self, token: &str, purpose: Purpose) -> Result<SessionClaims, SessionError>;
}
