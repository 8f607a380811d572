//! Domain services containing pure business logic.

mod persona_prompt;

pub use persona_prompt::*;
