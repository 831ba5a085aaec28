use auth::PasswordHasher;

use crate::config::PasswordConfig;
use crate::user::errors::PasswordError;
use crate::user::ports::CredentialHasher;

/// `CredentialHasher` backed by the auth library's Argon2id hasher.
pub struct Argon2CredentialHasher {
    hasher: PasswordHasher,
}

impl Argon2CredentialHasher {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self { hasher }
    }

    /// Build a hasher with the configured Argon2 cost.
    ///
    /// # Errors
    /// * `HashingFailed` - The configured parameters are rejected by Argon2
    pub fn from_config(config: &PasswordConfig) -> Result<Self, PasswordError> {
        let hasher =
            PasswordHasher::with_params(config.memory_kib, config.iterations, config.parallelism)?;
        Ok(Self::new(hasher))
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        self.hasher.hash(password).map_err(PasswordError::from)
    }

    fn verify(&self, digest: &str, password: &str) -> Result<(), PasswordError> {
        self.hasher
            .verify(digest, password)
            .map_err(PasswordError::from)
    }
}
