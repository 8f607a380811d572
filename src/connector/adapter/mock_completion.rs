use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::application::CompletionClient;
use crate::domain::{ChatMessage, DomainError};

pub const MOCK_REPLY: &str = "Well hello there... tell me more about yourself ;)";

/// A [`CompletionClient`] that answers without network access.
///
/// Records every request so callers can inspect what would have been sent.
pub struct MockCompletion {
    outcome: Result<String, String>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self::with_reply(MOCK_REPLY)
    }

    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            outcome: Ok(reply.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `UpstreamError` carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn last_messages(&self) -> Option<Vec<ChatMessage>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(messages.to_vec());
        debug!("MockCompletion: answering {} messages", messages.len());

        self.outcome.clone().map_err(DomainError::upstream)
    }
}
