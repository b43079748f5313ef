//! Pet endpoints. New pets belong to the caller.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;
use vetclinic_core::models::Removed;
use vetclinic_core::models::pet::{CreatePet, ReadPet, UpdatePet};
use vetclinic_core::repository::PetRepository;

use crate::error::ApiError;
use crate::extractors::{AuthUser, EntityId, ValidJson};
use crate::state::AppState;

/// POST /pets
async fn create_pet(
    State(state): State<AppState>,
    caller: AuthUser,
    ValidJson(input): ValidJson<CreatePet>,
) -> Result<(StatusCode, Json<ReadPet>), ApiError> {
    let pet = state.pets.create(input, caller.id()).await?;
    info!(pet_id = pet.id, user_id = caller.id(), "Registered pet");
    Ok((StatusCode::CREATED, Json(pet)))
}

/// GET /pets
async fn list_pets(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> Result<Json<Vec<ReadPet>>, ApiError> {
    Ok(Json(state.pets.find_all().await?))
}

/// GET /pets/{id}
async fn get_pet(
    State(state): State<AppState>,
    _caller: AuthUser,
    EntityId(id): EntityId,
) -> Result<Json<ReadPet>, ApiError> {
    Ok(Json(state.pets.find_one(id).await?))
}

/// PATCH /pets/{id}
// TODO: restrict to the owning user once ownership rules are settled.
async fn update_pet(
    State(state): State<AppState>,
    _caller: AuthUser,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<UpdatePet>,
) -> Result<Json<ReadPet>, ApiError> {
    Ok(Json(state.pets.update(id, input).await?))
}

/// DELETE /pets/{id}
async fn delete_pet(
    State(state): State<AppState>,
    _caller: AuthUser,
    EntityId(id): EntityId,
) -> Result<Json<Removed>, ApiError> {
    Ok(Json(state.pets.remove(id).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pets", get(list_pets).post(create_pet))
        .route(
            "/pets/{id}",
            get(get_pet).patch(update_pet).delete(delete_pet),
        )
}
