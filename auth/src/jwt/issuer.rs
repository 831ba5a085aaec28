use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Signs and verifies claim sets.
///
/// Holds the process-wide secret for its whole lifetime and always uses
/// HS256. Verification is a signature and expiry gate only: it does not look
/// at any custom claim.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenIssuer {
    /// Create a new issuer with a secret key.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration or the environment, never from code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign a claim set into a compact JWT.
    ///
    /// `iat` is filled in with the current time when missing. `exp` is only
    /// emitted when a lifetime was applied to the claims, so tokens built
    /// without one never expire.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue(&self, claims: &Claims) -> Result<String, JwtError> {
        let mut claims = claims.clone();
        if claims.iat.is_none() {
            claims.iat = Some(Utc::now().timestamp());
        }

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and, when present, its expiry.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidToken` - Signature is wrong or the token is malformed
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Tokens without 'exp' are valid and never expire
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.leeway = 0;
        validation
    }
}
