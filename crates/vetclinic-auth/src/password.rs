//! Password verification using Argon2id.
//!
//! Hashes are produced by the user repository; the cost parameters
//! travel inside the PHC string, so verification needs no configuration
//! beyond the optional pepper.

use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::error::AuthError;

/// Verify a plaintext password against an Argon2id PHC-format hash.
///
/// If `pepper` is provided it is prepended to the password before
/// verification. It must match the pepper used when hashing.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored hash is malformed.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let input = match pepper {
        Some(p) => format!("{p}{password}"),
        None => password.to_owned(),
    };

    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(input.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

/// Like [`verify_password`], but a mismatch is an
/// [`AuthError::InvalidCredentials`] error.
pub fn ensure_password(password: &str, hash: &str, pepper: Option<&str>) -> Result<(), AuthError> {
    if verify_password(password, hash, pepper)? {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}
