//! Utility functions for content hashing.

use sha2::{Digest, Sha256};

/// Compute the hex-encoded SHA-256 digest of a string's UTF-8 bytes.
///
/// Used both as the `sha256_hash` property and as the record id.
#[must_use]
pub fn sha256_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}
