mod chat;
mod persona;

pub use chat::*;
pub use persona::*;
