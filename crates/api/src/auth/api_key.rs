//! Admin API key handling.
//!
//! Only the SHA-256 digest of the configured key is kept in memory; incoming
//! keys are hashed the same way before comparison.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hex digest of an API key.
pub fn hash_api_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Whether `provided` matches the key whose digest is `expected_hash`.
pub fn verify_api_key(provided: &str, expected_hash: &str) -> bool {
    hash_api_key(provided) == expected_hash
}
