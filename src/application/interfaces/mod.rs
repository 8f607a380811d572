mod completion_client;
mod persona_repository;

pub use completion_client::*;
pub use persona_repository::*;
