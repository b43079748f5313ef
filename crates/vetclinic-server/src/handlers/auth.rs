//! Login and profile endpoints.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use vetclinic_auth::{LoginInput, LoginOutput};
use vetclinic_core::models::user::UserProfile;

use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginInput>,
) -> Result<Json<LoginOutput>, ApiError> {
    Ok(Json(state.auth.login(input).await?))
}

/// GET /auth/profile
async fn profile(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(state.auth.get_profile(caller.id()).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/profile", get(profile))
}
