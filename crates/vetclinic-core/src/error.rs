//! Error types for the vet clinic backend.

use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum VetError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{entity} with ID {id} not found")]
    NotFound { entity: String, id: String },

    #[error("Email already exists: {email}")]
    EmailConflict { email: String },

    #[error("Pet with ID {pet_id} not found. Cannot create appointment.")]
    PetNotFound { pet_id: i64 },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password cannot be changed through a profile update")]
    PasswordImmutable,

    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VetError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<ValidationErrors> for VetError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

pub type VetResult<T> = Result<T, VetError>;
