use crate::domain::DomainError;

use super::super::dto::{ChatRequest, ChatResponse};
use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, DomainError> {
        let use_case = self.container.chat_use_case();
        let reply = use_case
            .execute(&request.agent_id, &request.user_input)
            .await?;

        Ok(reply.into())
    }
}
