//! Password Hashing
//! Mission: One-way bcrypt digests, constant-time verification

use anyhow::{Context, Result};
use bcrypt::DEFAULT_COST;

/// Hash a plaintext password with bcrypt.
///
/// The digest embeds its own salt and cost, so nothing else needs to be
/// stored alongside it.
pub fn hash_password(plaintext: &str) -> Result<String> {
    bcrypt::hash(plaintext, DEFAULT_COST).context("Failed to hash password")
}

/// Verify a plaintext password against a stored bcrypt digest.
///
/// Never fails for a mismatched password; a digest that cannot be parsed
/// also verifies as false rather than erroring out of a login flow.
/// Comparison is bcrypt's own constant-time check.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    bcrypt::verify(plaintext, digest).unwrap_or(false)
}
