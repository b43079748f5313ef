//! Vet clinic database layer: SurrealDB connection management, schema
//! migrations and repository implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Repositories for users, pets and appointments ([`repository`])
//! - Error types and constraint classification ([`DbError`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use repository::{SurrealAppointmentRepository, SurrealPetRepository, SurrealUserRepository};
pub use schema::run_migrations;
