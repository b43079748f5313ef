//! Domain models and DTO contracts.
//!
//! Input DTOs (`Create*`, `Update*`) implement
//! [`Validate`](crate::validation::Validate); output DTOs (`Read*`,
//! [`UserProfile`](user::UserProfile)) carry only caller-facing fields.

pub mod appointment;
pub mod pet;
pub mod user;

use serde::Serialize;

/// Confirmation returned by delete operations that do not echo the
/// removed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Removed {
    pub message: String,
}
