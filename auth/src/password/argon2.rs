use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id with a random per-password salt. The cost parameters are
/// fixed at construction and shared by every hash and verify call.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a password hasher with the Argon2 default cost.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a password hasher with a tuned cost.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters are outside the ranges Argon2 accepts
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored digest.
    ///
    /// The digest carries its own parameters, so hashes produced under an
    /// older cost still verify.
    ///
    /// # Errors
    /// * `MissingDigest` - Digest is empty (no password set)
    /// * `MalformedDigest` - Digest is not a valid PHC string
    /// * `Mismatch` - Password does not match the digest
    pub fn verify(&self, digest: &str, password: &str) -> Result<(), PasswordError> {
        if digest.is_empty() {
            return Err(PasswordError::MissingDigest);
        }

        let parsed = PasswordHash::new(digest)
            .map_err(|e| PasswordError::MalformedDigest(e.to_string()))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(PasswordHashError::Password) => Err(PasswordError::Mismatch),
            Err(e) => Err(PasswordError::MalformedDigest(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
