//! Vet Clinic Server: HTTP transport over the clinic repositories.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod state;

pub use app::create_app;
pub use config::Cli;
pub use state::AppState;
