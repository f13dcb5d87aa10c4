//! Salted password digests.
//!
//! Digests are stored as `<salt>$<hash>` with both parts base64-encoded
//! and the hash computed as SHA-256 over `salt || password`. Verification
//! uses a constant-time comparison.

use crate::error::{DomainError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use constant_time_eq::constant_time_eq;
use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Hash a password with a freshly generated random salt.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let hash = digest(&salt, password);
    format!("{}${}", STANDARD.encode(salt), STANDARD.encode(hash))
}

/// Verify a password against a stored digest.
///
/// # Errors
///
/// Returns [`DomainError::Storage`] if the stored digest is malformed.
/// A well-formed digest that does not match yields `Ok(false)`.
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let (salt_b64, hash_b64) = stored
        .split_once('$')
        .ok_or_else(|| DomainError::Storage("malformed password digest".to_string()))?;
    let salt = STANDARD
        .decode(salt_b64)
        .map_err(|e| DomainError::Storage(format!("malformed digest salt: {e}")))?;
    let expected = STANDARD
        .decode(hash_b64)
        .map_err(|e| DomainError::Storage(format!("malformed digest hash: {e}")))?;
    let actual = digest(&salt, password);
    Ok(constant_time_eq(&actual, &expected))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let stored = hash_password("correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &stored).unwrap());
        assert!(!verify_password("incorrect horse", &stored).unwrap());
    }

    #[test]
    fn test_salts_differ_between_hashes() {
        let a = hash_password("same password");
        let b = hash_password("same password");
        assert_ne!(a, b);
        assert!(verify_password("same password", &a).unwrap());
        assert!(verify_password("same password", &b).unwrap());
    }

    #[test]
    fn test_malformed_digest_is_an_error() {
        assert!(verify_password("anything", "no-separator").is_err());
        assert!(verify_password("anything", "!!!$???").is_err());
    }
}
