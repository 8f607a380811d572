mod duckdb_persona_repository;
mod duckdb_pool;
mod in_memory_persona_repository;
mod mock_completion;
mod openai_client;

pub use duckdb_persona_repository::*;
pub use duckdb_pool::*;
pub use in_memory_persona_repository::*;
pub use mock_completion::*;
pub use openai_client::*;
