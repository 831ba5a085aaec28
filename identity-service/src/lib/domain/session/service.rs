use std::sync::Arc;

use async_trait::async_trait;
use auth::jwt::options;
use auth::ClaimsOption;
use auth::TokenIssuer;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::access_token_lifetime;
use crate::domain::session::models::claim_names;
use crate::domain::session::models::refresh_token_lifetime;
use crate::domain::session::models::PasswordlessAccount;
use crate::domain::session::models::Purpose;
use crate::domain::session::models::SessionClaims;
use crate::domain::session::models::TokenPair;
use crate::domain::session::ports::AuthSessionPort;
use crate::domain::user::models::CreatePasswordlessUserCommand;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::user::errors::PasswordError;
use crate::user::models::Username;
use crate::user::ports::CredentialHasher;
use crate::user::ports::UserRepository;

fn with_user(user: &User) -> ClaimsOption {
    options::all(vec![
        options::subject(user.id),
        options::claim(claim_names::USERNAME, user.username.as_str()),
    ])
}

fn with_purpose(purpose: Purpose) -> ClaimsOption {
    options::claim(claim_names::PURPOSE, purpose.as_str())
}

/// Account creation, login and refresh.
///
/// Holds no per-user state: every call works from the user record as it is
/// in storage right now.
pub struct AuthSessionService<UR, CH>
where
    UR: UserRepository,
    CH: CredentialHasher,
{
    repository: Arc<UR>,
    hasher: Arc<CH>,
    issuer: Arc<TokenIssuer>,
}

impl<UR, CH> AuthSessionService<UR, CH>
where
    UR: UserRepository,
    CH: CredentialHasher,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `hasher` - Password hashing implementation
    /// * `issuer` - Token signer holding the process-wide secret
    pub fn new(repository: Arc<UR>, hasher: Arc<CH>, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            repository,
            hasher,
            issuer,
        }
    }

    /// Sign an access token and a refresh token for `user`.
    ///
    /// Whether the refresh token is passwordless (and therefore has no
    /// expiry) follows the user's current digest, never an older token.
    fn mint_token_pair(&self, user: &User) -> Result<TokenPair, SessionError> {
        let passwordless = user.is_passwordless();

        let access = options::build([
            with_user(user),
            options::lifetime(access_token_lifetime()),
            with_purpose(Purpose::Authorize),
        ]);

        let refresh = options::build([
            with_user(user),
            options::when(
                !passwordless,
                vec![options::lifetime(refresh_token_lifetime())],
            ),
            options::claim(claim_names::PASSWORDLESS, passwordless),
            with_purpose(Purpose::Refresh),
        ]);

        Ok(TokenPair {
            access_token: self.issuer.issue(&access)?,
            refresh_token: self.issuer.issue(&refresh)?,
        })
    }
}

#[async_trait]
impl<UR, CH> AuthSessionPort for AuthSessionService<UR, CH>
where
    UR: UserRepository,
    CH: CredentialHasher,
{
    async fn create_account(&self, command: CreateUserCommand) -> Result<User, SessionError> {
        if command.password.is_empty() {
            return Err(SessionError::InvalidInput(
                PasswordError::Empty.to_string(),
            ));
        }

        let password_hash = self.hasher.hash(&command.password).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            SessionError::Internal(e.to_string())
        })?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                name: command.name,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "Account created");

        Ok(user)
    }

    async fn create_passwordless_account(
        &self,
        command: CreatePasswordlessUserCommand,
    ) -> Result<PasswordlessAccount, SessionError> {
        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                name: command.name,
                password_hash: String::new(),
            })
            .await?;

        let tokens = self.mint_token_pair(&user)?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            "Passwordless account created"
        );

        Ok(PasswordlessAccount { user, tokens })
    }

    async fn login(&self, username: &Username, password: &str) -> Result<TokenPair, SessionError> {
        let Some(user) = self.repository.find_by_username(username).await? else {
            tracing::warn!(username = %username, "Login rejected: unknown username");
            return Err(SessionError::Unauthorized);
        };

        // An empty digest can never match; skip the hasher entirely.
        if user.is_passwordless() {
            tracing::warn!(user_id = %user.id, "Login rejected: account has no password");
            return Err(SessionError::Unauthorized);
        }

        if let Err(e) = self.hasher.verify(&user.password_hash, password) {
            match e {
                PasswordError::Mismatch => {
                    tracing::warn!(user_id = %user.id, "Login rejected: wrong password")
                }
                other => {
                    tracing::error!(user_id = %user.id, error = %other, "Password verification failed")
                }
            }
            return Err(SessionError::Unauthorized);
        }

        let tokens = self.mint_token_pair(&user)?;
        tracing::info!(user_id = %user.id, "Login succeeded");

        Ok(tokens)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, SessionError> {
        let claims = self.verify_token(refresh_token, Purpose::Refresh)?;

        let Some(user) = self.repository.find_by_id(&claims.user_id).await? else {
            tracing::warn!(user_id = %claims.user_id, "Refresh rejected: user no longer exists");
            return Err(SessionError::Unauthorized);
        };

        // A token minted while the account had no password must stop working
        // once a password is set, even though it is still validly signed.
        if claims.passwordless && !user.is_passwordless() {
            tracing::warn!(
                user_id = %user.id,
                "Refresh rejected: passwordless token for an account that now has a password"
            );
            return Err(SessionError::Unauthorized);
        }

        let tokens = self.mint_token_pair(&user)?;
        tracing::info!(user_id = %user.id, "Tokens refreshed");

        Ok(tokens)
    }

    fn verify_token(&self, token: &str, purpose: Purpose) -> Result<SessionClaims, SessionError> {
        let claims = self.issuer.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            SessionError::from(e)
        })?;

        let session = SessionClaims::try_from(&claims)?;
        if session.purpose != purpose {
            tracing::warn!(
                user_id = %session.user_id,
                expected = %purpose,
                actual = %session.purpose,
                "Token presented for the wrong purpose"
            );
            return Err(SessionError::Unauthorized);
        }

        Ok(session)
    }
}
