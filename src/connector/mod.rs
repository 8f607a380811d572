//! # Connector Layer
//!
//! External integrations implementing the application ports:
//! - Storage (DuckDB connection pool, in-memory)
//! - Completion (OpenAI-compatible chat completions, mock)
//! - HTTP API (axum) and the terminal client (ratatui)

pub mod adapter;
pub mod api;
pub mod client;

pub use adapter::*;
