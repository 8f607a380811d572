pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatWithPersonaUseCase, CompletionClient, CreatePersonaUseCase, GetPersonaUseCase,
    PersonaRepository,
};

pub use connector::{
    DuckdbPersonaRepository, DuckdbPool, InMemoryPersonaRepository, MockCompletion, OpenAiClient,
    OpenAiConfig,
};

pub use domain::{
    ChatMessage, ChatReply, ChatRole, DomainError, Persona, PersonaDraft, PersonaLinks,
    PersonaPrompt,
};
