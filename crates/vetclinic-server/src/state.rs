//! Shared application state handed to every request handler.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use vetclinic_auth::{AuthConfig, AuthService};
use vetclinic_db::{SurrealAppointmentRepository, SurrealPetRepository, SurrealUserRepository};

/// Repositories over one shared database handle, plus the auth service.
///
/// Cloning is cheap: repositories clone the underlying client, which
/// shares a single connection.
#[derive(Clone)]
pub struct AppState {
    pub users: SurrealUserRepository<Any>,
    pub pets: SurrealPetRepository<Any>,
    pub appointments: SurrealAppointmentRepository<Any>,
    pub auth: Arc<AuthService<SurrealUserRepository<Any>>>,
}

impl AppState {
    pub fn new(db: Surreal<Any>, auth: AuthConfig) -> Self {
        let users = match &auth.pepper {
            Some(pepper) => SurrealUserRepository::with_pepper(db.clone(), pepper.clone()),
            None => SurrealUserRepository::new(db.clone()),
        };

        Self {
            pets: SurrealPetRepository::new(db.clone()),
            appointments: SurrealAppointmentRepository::new(db),
            auth: Arc::new(AuthService::new(users.clone(), auth)),
            users,
        }
    }

    pub fn auth_config(&self) -> &AuthConfig {
        self.auth.config()
    }
}
