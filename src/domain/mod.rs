//! # Domain Layer
//!
//! Persona and chat models, the error taxonomy, and the prompt template.
//! This layer is independent of storage, HTTP, and the completion provider.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
