//! Domain layer containing business entities and storage contracts.
//!
//! - [`entities`] - Core data structures
//! - [`errors`] - Error taxonomy shared by the registry and its collaborators
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on the HTTP or database layers beyond
//! the error conversion from `sqlx`.

pub mod entities;
pub mod errors;
pub mod repositories;
