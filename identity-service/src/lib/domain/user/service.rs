use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::ports::CredentialHasher;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR, CH>
where
    UR: UserRepository,
    CH: CredentialHasher,
{
    repository: Arc<UR>,
    hasher: Arc<CH>,
}

impl<UR, CH> UserService<UR, CH>
where
    UR: UserRepository,
    CH: CredentialHasher,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `hasher` - Password hashing implementation
    pub fn new(repository: Arc<UR>, hasher: Arc<CH>) -> Self {
        Self { repository, hasher }
    }
}

#[async_trait]
impl<UR, CH> UserServicePort for UserService<UR, CH>
where
    UR: UserRepository,
    CH: CredentialHasher,
{
    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn set_password(&self, id: &UserId, password: &str) -> Result<User, UserError> {
        if password.is_empty() {
            return Err(PasswordError::Empty.into());
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self.repository.update_password(id, &password_hash).await?;

        tracing::info!(user_id = %user.id, "Password set");

        Ok(user)
    }
}
