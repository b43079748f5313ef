//! SurrealDB repository implementations.

mod appointment;
mod pet;
mod sequence;
mod user;

pub use appointment::SurrealAppointmentRepository;
pub use pet::SurrealPetRepository;
pub use user::SurrealUserRepository;

use tracing::error;
use vetclinic_core::error::VetError;

use crate::error::DbError;

/// Log an unexpected database failure with its operation context and
/// re-signal it without internals.
pub(crate) fn unexpected(operation: &'static str, err: DbError) -> VetError {
    error!(operation, error = %err, "Unexpected database failure");
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_failures_surface_as_database_errors() {
        let err = unexpected("find pet", DbError::Query("connection reset".into()));
        assert!(matches!(err, VetError::Database(ref msg) if msg.contains("connection reset")));
    }
}
