use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for account management outside the login flows.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Set or replace the account password.
    ///
    /// Setting a password on a passwordless account invalidates every
    /// refresh token minted while it had none.
    ///
    /// # Errors
    /// * `Password(Empty)` - Password is empty
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_password(&self, id: &UserId, password: &str) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations bound every call by a deadline and fail with
/// `DatabaseTimeout` when it passes.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a user and read the stored row back in one transaction.
    ///
    /// # Returns
    /// The stored user, including the server-assigned id and timestamp
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Replace the stored password digest.
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<User, UserError>;
}

/// One-way password hashing.
///
/// An empty digest means "no password set" and never verifies.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hash a password into a self-describing digest.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Check a password against a stored digest.
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match
    /// * `MissingDigest` - Digest is empty
    /// * `MalformedDigest` - Digest cannot be parsed
    fn verify(&self, digest: &str, password: &str) -> Result<(), PasswordError>;
}
