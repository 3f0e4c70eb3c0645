//! Password hashing strategies
//!
//! Authentication compares a candidate password against a stored digest.
//! The strategy is pluggable: the default is salted Argon2id, while the
//! unsalted SHA-256 digest the service historically stored is kept as an
//! explicit legacy strategy (and as the fast hasher in tests).

use crate::error::{AccountError, Result};
use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// One-way password digest strategy
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a storable digest
    fn hash(&self, password: &str) -> Result<String>;

    /// Check a candidate password against a stored digest
    fn verify(&self, password: &str, digest: &str) -> bool;
}

/// Argon2id with a per-password random salt (default strategy)
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AccountError::HashError(e.to_string()))
    }

    fn verify(&self, password: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Unsalted SHA-256 hex digest (legacy strategy)
///
/// Kept for records written before the Argon2 migration. Verification is
/// digest equality over the hex encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl PasswordHasher for Sha256Hasher {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(hex::encode(Sha256::digest(password.as_bytes())))
    }

    fn verify(&self, password: &str, digest: &str) -> bool {
        self.hash(password).map(|h| h == digest).unwrap_or(false)
    }
}
