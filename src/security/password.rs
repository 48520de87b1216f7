use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::error::{AppError, AppResult};

/// A well-formed digest no account owns. Checking a password against it costs
/// the same as checking a real account, so a missing email is not faster.
pub const UNKNOWN_USER_DIGEST: &str = "$argon2id$v=19$m=19456,t=2,p=1$KymlWQXNkmsoqBZo4AO5AA$2kIJ50KiDSGhDjTO1c2CmUQ3DrfDE5u2vMgzZ6bbH4M";

/// Salted argon2id hashing with a fixed work factor.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        }
    }

    /// Returns a PHC-formatted digest; the plaintext is never stored.
    pub fn hash(&self, plaintext: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))?;
        Ok(digest.to_string())
    }

    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            tracing::warn!("stored password hash is not a valid PHC string");
            return false;
        };
        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
