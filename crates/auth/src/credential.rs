//! Opaque one-way credential hashing and comparison.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("credential hashing failed: {0}")]
    Hash(String),
}

/// One-way keyed comparison of a presented secret against a stored hash.
///
/// The plaintext secret never leaves this boundary: it is hashed on the
/// way into storage and compared in constant time on the way back.
pub trait CredentialVerifier: Send + Sync {
    fn hash(&self, secret: &str) -> Result<String, CredentialError>;
    fn verify(&self, secret: &str, stored: &str) -> bool;
}

/// Argon2id-backed verifier with per-secret random salts (PHC strings).
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Credentials;

impl CredentialVerifier for Argon2Credentials {
    fn hash(&self, secret: &str) -> Result<String, CredentialError> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes)
            .map_err(|e| CredentialError::Hash(e.to_string()))?;
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| CredentialError::Hash(e.to_string()))?;

        let phc = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| CredentialError::Hash(e.to_string()))?
            .to_string();
        Ok(phc)
    }

    fn verify(&self, secret: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(secret.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_accepts_the_same_secret() {
        let creds = Argon2Credentials;
        let phc = creds.hash("hunter2").unwrap();

        assert!(phc.starts_with("$argon2"));
        assert!(creds.verify("hunter2", &phc));
        assert!(!creds.verify("hunter3", &phc));
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        let creds = Argon2Credentials;
        assert!(!creds.verify("hunter2", "not-a-phc-string"));
        assert!(!creds.verify("hunter2", ""));
    }
}
