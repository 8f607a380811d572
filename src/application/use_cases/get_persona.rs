use std::sync::Arc;

use tracing::debug;

use crate::application::PersonaRepository;
use crate::domain::{DomainError, Persona};

pub struct GetPersonaUseCase {
    persona_repo: Arc<dyn PersonaRepository>,
}

impl GetPersonaUseCase {
    pub fn new(persona_repo: Arc<dyn PersonaRepository>) -> Self {
        Self { persona_repo }
    }

    pub async fn execute(&self, id: &str) -> Result<Persona, DomainError> {
        let persona = self
            .persona_repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Agent not found: {}", id)))?;

        debug!("Fetched persona {}", persona.summary());
        Ok(persona)
    }
}
