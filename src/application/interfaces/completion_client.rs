use async_trait::async_trait;

use crate::domain::{ChatMessage, DomainError};

/// Sends role-tagged messages to a text-completion model and returns the generated text.
///
/// Model identifier, token cap and temperature are fixed per implementation
/// instance. Implementors report every transport or payload failure as
/// `UpstreamError` and never retry.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError>;
}
