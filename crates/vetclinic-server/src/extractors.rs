//! Custom Axum extractors.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tracing::warn;
use vetclinic_auth::ValidatedClaims;
use vetclinic_auth::token::validate_access_token;
use vetclinic_core::validation::{Validate, ValidationErrors, validate};

use crate::error::ApiError;
use crate::state::AppState;

/// The caller, proven by a valid bearer token.
///
/// Rejects with 401 before the handler (and any repository) runs.
pub struct AuthUser(pub ValidatedClaims);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.user_id()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::unauthorized("missing bearer token"))?;

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::unauthorized("malformed authorization header"))?;

        let claims = validate_access_token(token, state.auth_config()).map_err(|err| {
            warn!(error = %err, "Rejected access token");
            ApiError::from(err)
        })?;

        Ok(Self(claims))
    }
}

/// JSON body that has been deserialized and then validated.
///
/// Malformed bodies and rule violations both surface as validation
/// errors (400).
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationErrors::single("body", rejection.body_text()))?;

        validate(&value)?;
        Ok(Self(value))
    }
}

/// Integer record id taken from the `{id}` path segment.
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ValidationErrors::single("id", "id is required"))?;

        let id = raw
            .parse::<i64>()
            .map_err(|_| ValidationErrors::single("id", "id must be an integer"))?;

        Ok(Self(id))
    }
}
