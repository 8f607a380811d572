use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{CompletionClient, PersonaRepository};
use crate::domain::{ChatMessage, ChatReply, DomainError, PersonaPrompt};

/// Use case for a single, stateless chat turn with a stored persona.
///
/// The persona is read first, then one completion request is issued with the
/// rendered prompt as the only user message. Nothing is cached: identical
/// calls each hit the completion API.
pub struct ChatWithPersonaUseCase {
    persona_repo: Arc<dyn PersonaRepository>,
    completion_client: Arc<dyn CompletionClient>,
}

impl ChatWithPersonaUseCase {
    pub fn new(
        persona_repo: Arc<dyn PersonaRepository>,
        completion_client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            persona_repo,
            completion_client,
        }
    }

    pub async fn execute(
        &self,
        persona_id: &str,
        user_input: &str,
    ) -> Result<ChatReply, DomainError> {
        let persona = self
            .persona_repo
            .get(persona_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Agent not found: {}", persona_id)))?;

        let prompt = PersonaPrompt::render(persona.behavior_prompt(), user_input);
        debug!(
            "Rendered prompt for persona {} ({} chars)",
            persona.id(),
            prompt.len()
        );

        let messages = [ChatMessage::user(prompt)];
        let completion = self
            .completion_client
            .complete(&messages)
            .await
            .map_err(|e| {
                warn!("Completion failed for persona {}: {}", persona_id, e);
                match e {
                    DomainError::UpstreamError(_) => e,
                    other => DomainError::upstream(other.to_string()),
                }
            })?;

        Ok(ChatReply {
            reply: completion.trim().to_string(),
            links: persona.into_links(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::{InMemoryPersonaRepository, MockCompletion};
    use crate::domain::{ChatRole, PersonaDraft, PersonaLinks};

    fn links() -> PersonaLinks {
        PersonaLinks::from([
            ("onlyfans".to_string(), "url1".to_string()),
            ("tip".to_string(), "url2".to_string()),
        ])
    }

    async fn setup(completion: MockCompletion) -> (String, Arc<MockCompletion>, ChatWithPersonaUseCase) {
        let repo = Arc::new(InMemoryPersonaRepository::new());
        let id = repo
            .create(PersonaDraft::new("c1", "Lola", "flirty and playful", links()))
            .await
            .unwrap();
        let completion = Arc::new(completion);
        let use_case = ChatWithPersonaUseCase::new(repo, completion.clone());
        (id, completion, use_case)
    }

    #[tokio::test]
    async fn reply_is_trimmed_and_links_returned_unchanged() {
        let (id, _, use_case) = setup(MockCompletion::with_reply("  hey you ;)\n\n")).await;

        let reply = use_case.execute(&id, "hi").await.unwrap();

        assert_eq!(reply.reply, "hey you ;)");
        assert_eq!(reply.links, links());
    }

    #[tokio::test]
    async fn sends_a_single_user_message_with_rendered_prompt() {
        let (id, completion, use_case) = setup(MockCompletion::new()).await;

        use_case.execute(&id, "what are you up to?").await.unwrap();

        let messages = completion.last_messages().expect("completion called");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, ChatRole::User);
        assert!(messages[0].content.contains("flirty and playful"));
        assert!(messages[0].content.contains("what are you up to?"));
    }

    #[tokio::test]
    async fn unknown_persona_is_not_found_without_calling_completion() {
        let (_, completion, use_case) = setup(MockCompletion::new()).await;

        let err = use_case.execute("nonexistent-id", "hi").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(completion.call_count(), 0);
    }

    #[tokio::test]
    async fn completion_failure_is_upstream_error() {
        let (id, _, use_case) = setup(MockCompletion::failing("model overloaded")).await;

        let err = use_case.execute(&id, "hi").await.unwrap_err();
        assert!(err.is_upstream_error());
    }

    #[tokio::test]
    async fn identical_calls_are_not_cached() {
        let (id, completion, use_case) = setup(MockCompletion::new()).await;

        use_case.execute(&id, "hi").await.unwrap();
        use_case.execute(&id, "hi").await.unwrap();

        assert_eq!(completion.call_count(), 2);
    }
}
