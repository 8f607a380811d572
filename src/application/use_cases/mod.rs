mod chat_with_persona;
mod create_persona;
mod get_persona;

pub use chat_with_persona::*;
pub use create_persona::*;
pub use get_persona::*;
