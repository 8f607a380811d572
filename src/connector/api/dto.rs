//! JSON wire types shared by the HTTP service and the terminal client.

use serde::{Deserialize, Serialize};

use crate::domain::{ChatReply, Persona, PersonaDraft, PersonaLinks};

/// Body of `POST /create-agent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAgentRequest {
    pub creator_id: String,
    pub persona_name: String,
    pub personality_prompt: String,
    #[serde(default)]
    pub links: PersonaLinks,
}

impl From<CreateAgentRequest> for PersonaDraft {
    fn from(request: CreateAgentRequest) -> Self {
        PersonaDraft::new(
            request.creator_id,
            request.persona_name,
            request.personality_prompt,
            request.links,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAgentResponse {
    pub agent_id: String,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub agent_id: String,
    pub user_input: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub links: PersonaLinks,
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        Self {
            reply: reply.reply,
            links: reply.links,
        }
    }
}

/// Body returned by `GET /agent/{agent_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub persona_name: String,
    pub prompt: String,
    pub links: PersonaLinks,
}

impl From<Persona> for AgentResponse {
    fn from(persona: Persona) -> Self {
        Self {
            persona_name: persona.display_name().to_string(),
            prompt: persona.behavior_prompt().to_string(),
            links: persona.into_links(),
        }
    }
}

/// Error body produced by the service for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}
