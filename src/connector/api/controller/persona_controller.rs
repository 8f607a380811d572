use crate::domain::DomainError;

use super::super::dto::{AgentResponse, CreateAgentRequest, CreateAgentResponse};
use super::super::Container;

pub struct PersonaController<'a> {
    container: &'a Container,
}

impl<'a> PersonaController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn create(
        &self,
        request: CreateAgentRequest,
    ) -> Result<CreateAgentResponse, DomainError> {
        let use_case = self.container.create_persona_use_case();
        let agent_id = use_case.execute(request.into()).await?;

        Ok(CreateAgentResponse { agent_id })
    }

    pub async fn fetch(&self, agent_id: &str) -> Result<AgentResponse, DomainError> {
        let use_case = self.container.get_persona_use_case();
        let persona = use_case.execute(agent_id).await?;

        Ok(persona.into())
    }
}
