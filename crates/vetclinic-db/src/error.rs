//! Database-specific error types and conversions.

use vetclinic_core::error::VetError;

use crate::schema::{APPOINTMENT_PET_FIELD, PET_OWNER_FIELD, USER_EMAIL_INDEX};

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Unique index `{index}` rejected a duplicate value")]
    UniqueViolation { index: &'static str },

    #[error("Field `{field}` references a missing record")]
    ForeignKeyViolation { field: &'static str },

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl DbError {
    /// Classify a failed statement by the constraint it tripped.
    ///
    /// SurrealDB reports constraint failures as text naming the index or
    /// field involved, so the known constraint names from the schema are
    /// matched against the message.
    pub fn classify(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        classify_message(&message).unwrap_or(Self::Query(message))
    }
}

fn classify_message(message: &str) -> Option<DbError> {
    if message.contains(USER_EMAIL_INDEX) {
        return Some(DbError::UniqueViolation {
            index: USER_EMAIL_INDEX,
        });
    }

    let lowered = message.to_lowercase();
    let assertion = lowered.contains("conform") || lowered.contains("assert");
    if !assertion {
        return None;
    }
    [APPOINTMENT_PET_FIELD, PET_OWNER_FIELD]
        .into_iter()
        .find(|field| message.contains(&format!("`{field}`")))
        .map(|field| DbError::ForeignKeyViolation { field })
}

impl From<DbError> for VetError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => VetError::NotFound { entity, id },
            other => VetError::Database(other.to_string()),
        }
    }
}
