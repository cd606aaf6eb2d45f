use error_stack::{Result, ResultExt};
use thiserror::Error;

/// Default bcrypt work factor when the configuration does not say
/// otherwise.
pub const DEFAULT_COST: u32 = 10;

#[derive(Debug, Error)]
#[error("Failed to generate password hash")]
pub struct HashPasswordError;

/// Hashes a password with bcrypt at the given work factor. The digest
/// embeds its own salt and cost, so verification needs no extra state.
pub fn hash(password: &str, cost: u32) -> Result<String, HashPasswordError> {
    bcrypt::hash(password, cost).change_context(HashPasswordError)
}

#[derive(Debug, Error)]
#[error("Failed to verify password")]
pub struct VerifyPasswordError;

/// Checks a password attempt against a stored bcrypt digest. A mismatch
/// is `Ok(false)`; only an unparseable digest or a hashing failure is
/// an error.
pub fn verify(password: &str, digest: &str) -> Result<bool, VerifyPasswordError> {
    bcrypt::verify(password, digest).change_context(VerifyPasswordError)
}
