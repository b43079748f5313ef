//! Vet clinic core: domain models, DTO contracts, validation and the
//! repository traits implemented by the database crate.

pub mod error;
pub mod models;
pub mod repository;
pub mod validation;
pub mod weight;

pub use error::{VetError, VetResult};
