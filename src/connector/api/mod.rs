pub mod container;
pub mod controller;
pub mod dto;
pub mod error;
pub mod router;
pub mod server;

pub use container::{Container, ContainerConfig};
pub use dto::*;
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use server::{serve, serve_with_listener};
