//! API error type with `IntoResponse`.
//!
//! Domain errors become JSON bodies of the form
//! `{"error": <kind>, "message": <text>}`. Storage and internal failures
//! are logged and answered with a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vetclinic_auth::AuthError;
use vetclinic_core::error::VetError;
use vetclinic_core::validation::ValidationErrors;

#[derive(Debug)]
pub struct ApiError(pub VetError);

impl ApiError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self(VetError::Unauthorized {
            reason: reason.into(),
        })
    }

    fn status(&self) -> StatusCode {
        match &self.0 {
            VetError::Validation(_) | VetError::PasswordImmutable => StatusCode::BAD_REQUEST,
            VetError::InvalidCredentials | VetError::Unauthorized { .. } => {
                StatusCode::UNAUTHORIZED
            }
            VetError::NotFound { .. } | VetError::PetNotFound { .. } => StatusCode::NOT_FOUND,
            VetError::EmailConflict { .. } => StatusCode::CONFLICT,
            VetError::Database(_) | VetError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match &self.0 {
            VetError::Validation(_) => "validation_error",
            VetError::PasswordImmutable => "password_immutable",
            VetError::InvalidCredentials => "invalid_credentials",
            VetError::Unauthorized { .. } => "unauthorized",
            VetError::NotFound { .. } | VetError::PetNotFound { .. } => "not_found",
            VetError::EmailConflict { .. } => "email_conflict",
            VetError::Database(_) | VetError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let body = match &self.0 {
            VetError::Validation(errors) => json!({
                "error": kind,
                "message": self.0.to_string(),
                "fields": errors,
            }),
            VetError::Database(_) | VetError::Internal(_) => {
                tracing::error!(error = %self.0, "Request failed");
                json!({
                    "error": kind,
                    "message": "an internal error occurred",
                })
            }
            other => json!({
                "error": kind,
                "message": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<VetError> for ApiError {
    fn from(err: VetError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        Self(err.into())
    }
}
