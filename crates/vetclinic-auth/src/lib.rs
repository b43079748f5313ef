//! Vet clinic auth: password verification, JWT issuance/validation and
//! the login flow.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, LoginInput, LoginOutput};
pub use token::{AccessTokenClaims, ValidatedClaims};
