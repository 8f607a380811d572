use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::connector::api::{
    AgentResponse, ChatRequest, ChatResponse, CreateAgentRequest, CreateAgentResponse,
    ErrorResponse,
};
use crate::domain::DomainError;

/// HTTP client for the persona chat service.
///
/// A 404 from the service becomes `NotFound`; any other failure (transport,
/// error status, unreadable body) becomes `UpstreamError`.
#[derive(Clone)]
pub struct PersonaApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl PersonaApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn create_agent(&self, request: &CreateAgentRequest) -> Result<String, DomainError> {
        let response: CreateAgentResponse = self.post("/create-agent", request).await?;
        Ok(response.agent_id)
    }

    pub async fn chat(
        &self,
        agent_id: &str,
        user_input: &str,
    ) -> Result<ChatResponse, DomainError> {
        let request = ChatRequest {
            agent_id: agent_id.to_string(),
            user_input: user_input.to_string(),
        };
        self.post("/chat", &request).await
    }

    pub async fn get_agent(&self, agent_id: &str) -> Result<AgentResponse, DomainError> {
        let url = format!("{}/agent/{}", self.base_url, agent_id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Request to {url} failed: {e}")))?;

        Self::decode(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, DomainError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Request to {url} failed: {e}")))?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, DomainError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| DomainError::upstream(format!("Unreadable response: {e}")));
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| status.to_string());

        if status == StatusCode::NOT_FOUND {
            Err(DomainError::not_found(message))
        } else {
            Err(DomainError::upstream(format!("Service returned {status}: {message}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let client = PersonaApiClient::new("http://127.0.0.1:8000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }
}
