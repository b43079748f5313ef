//! JWT access token issuance and verification (HS256).

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::AuthError;

/// JWT claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessTokenClaims {
    /// Subject: the user id.
    pub sub: i64,
    /// Email the user signed in with.
    pub email: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

fn signing_secret(config: &AuthConfig) -> Result<&[u8], AuthError> {
    if config.jwt_secret.is_empty() {
        return Err(AuthError::Crypto("JWT secret is not configured".into()));
    }
    Ok(config.jwt_secret.as_bytes())
}

/// Issue a signed HS256 access token for `user_id`.
pub fn issue_access_token(
    user_id: i64,
    email: &str,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = AccessTokenClaims {
        sub: user_id,
        email: email.to_owned(),
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now + config.access_token_lifetime_secs as i64,
    };

    let key = EncodingKey::from_secret(signing_secret(config)?);
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify an HS256 access token.
pub fn decode_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<AccessTokenClaims, AuthError> {
    let key = DecodingKey::from_secret(signing_secret(config)?);

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.jwt_issuer]);
    // `sub` is numeric, so its presence is enforced by deserialization.
    validation.set_required_spec_claims(&["exp", "iss"]);

    jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Validated JWT claims, a newtype proving the token was verified.
///
/// Used by the HTTP layer to identify the caller.
#[derive(Debug, Clone)]
pub struct ValidatedClaims(pub AccessTokenClaims);

impl ValidatedClaims {
    pub fn user_id(&self) -> i64 {
        self.0.sub
    }
}

/// Validate a JWT access token (signature, expiry, issuer) and return
/// the verified claims. No database lookup is performed.
pub fn validate_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<ValidatedClaims, AuthError> {
    decode_access_token(token, config).map(ValidatedClaims)
}
