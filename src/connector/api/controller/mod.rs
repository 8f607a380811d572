pub mod chat_controller;
pub mod persona_controller;

pub use chat_controller::ChatController;
pub use persona_controller::PersonaController;
