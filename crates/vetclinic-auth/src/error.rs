//! Authentication error types.

use thiserror::Error;
use vetclinic_core::error::VetError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for VetError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => VetError::InvalidCredentials,
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => VetError::Unauthorized {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => VetError::Internal(msg),
        }
    }
}
