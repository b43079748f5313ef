//! Appointment endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;
use vetclinic_core::models::Removed;
use vetclinic_core::models::appointment::{
    AppointmentFilter, CreateAppointment, ReadAppointment, UpdateAppointment,
};
use vetclinic_core::repository::AppointmentRepository;

use crate::error::ApiError;
use crate::extractors::{AuthUser, EntityId, ValidJson};
use crate::state::AppState;

/// POST /appointments
async fn create_appointment(
    State(state): State<AppState>,
    _caller: AuthUser,
    ValidJson(input): ValidJson<CreateAppointment>,
) -> Result<(StatusCode, Json<ReadAppointment>), ApiError> {
    let appointment = state.appointments.create(input).await?;
    info!(
        appointment_id = appointment.id,
        pet_id = appointment.pet.id,
        "Booked appointment"
    );
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// GET /appointments?date=&service=&petId=
async fn list_appointments(
    State(state): State<AppState>,
    _caller: AuthUser,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<Vec<ReadAppointment>>, ApiError> {
    let query = filter.parse()?;
    Ok(Json(state.appointments.find_all(query).await?))
}

/// GET /appointments/{id}
async fn get_appointment(
    State(state): State<AppState>,
    _caller: AuthUser,
    EntityId(id): EntityId,
) -> Result<Json<ReadAppointment>, ApiError> {
    Ok(Json(state.appointments.find_one(id).await?))
}

/// PATCH /appointments/{id}
async fn update_appointment(
    State(state): State<AppState>,
    _caller: AuthUser,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<UpdateAppointment>,
) -> Result<Json<ReadAppointment>, ApiError> {
    Ok(Json(state.appointments.update(id, input).await?))
}

/// DELETE /appointments/{id}
async fn delete_appointment(
    State(state): State<AppState>,
    _caller: AuthUser,
    EntityId(id): EntityId,
) -> Result<Json<Removed>, ApiError> {
    Ok(Json(state.appointments.remove(id).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route(
            "/appointments/{id}",
            get(get_appointment)
                .patch(update_appointment)
                .delete(delete_appointment),
        )
}
