//! User endpoints. Signup is public; everything else needs a token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;
use vetclinic_core::models::user::{CreateUser, UpdateUser, User, UserProfile};
use vetclinic_core::repository::UserRepository;

use crate::error::ApiError;
use crate::extractors::{AuthUser, EntityId, ValidJson};
use crate::state::AppState;

/// POST /users
async fn create_user(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.users.create(input).await?;
    info!(user_id = user.id, "Created user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
async fn list_users(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.find_all().await?))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<AppState>,
    _caller: AuthUser,
    EntityId(id): EntityId,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(state.users.find_one(id).await?))
}

/// PATCH /users/{id}
async fn update_user(
    State(state): State<AppState>,
    _caller: AuthUser,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<UpdateUser>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.update(id, input).await?))
}

/// DELETE /users/{id}
async fn delete_user(
    State(state): State<AppState>,
    _caller: AuthUser,
    EntityId(id): EntityId,
) -> Result<Json<User>, ApiError> {
    let user = state.users.remove(id).await?;
    info!(user_id = id, "Deleted user");
    Ok(Json(user))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}
