use std::sync::Arc;

use tracing::info;

use crate::application::PersonaRepository;
use crate::domain::{DomainError, PersonaDraft};

/// Use case for defining a new persona.
pub struct CreatePersonaUseCase {
    persona_repo: Arc<dyn PersonaRepository>,
}

impl CreatePersonaUseCase {
    pub fn new(persona_repo: Arc<dyn PersonaRepository>) -> Self {
        Self { persona_repo }
    }

    /// Returns the identifier of the stored persona.
    ///
    /// Emptiness of the name or prompt is not checked here; the store accepts
    /// whatever the creator submitted.
    pub async fn execute(&self, draft: PersonaDraft) -> Result<String, DomainError> {
        let owner = draft.owner_id.clone();
        let name = draft.display_name.clone();
        let link_count = draft.links.len();

        let id = self.persona_repo.create(draft).await?;

        info!(
            "Created persona '{}' ({}) for creator {} with {} links",
            name, id, owner, link_count
        );

        Ok(id)
    }
}
