use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::application::{
    ChatWithPersonaUseCase, CompletionClient, CreatePersonaUseCase, GetPersonaUseCase,
    PersonaRepository,
};
use crate::connector::adapter::{
    DuckdbPersonaRepository, DuckdbPool, InMemoryPersonaRepository, MockCompletion, OpenAiClient,
    OpenAiConfig,
};

pub struct ContainerConfig {
    pub db_path: PathBuf,
    pub pool_size: usize,
    /// Keep personas in process memory instead of DuckDB.
    pub memory_storage: bool,
    /// Answer chats with [`MockCompletion`] instead of calling the completion API.
    pub mock_completions: bool,
    /// Required unless `mock_completions` is set.
    pub completion: Option<OpenAiConfig>,
}

/// Explicitly constructed service graph handed to every request handler.
///
/// Owns the store handle: build it once at startup and call
/// [`Container::shutdown`] when the process stops.
pub struct Container {
    persona_repo: Arc<dyn PersonaRepository>,
    completion_client: Arc<dyn CompletionClient>,
    pool: Option<DuckdbPool>,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        let (persona_repo, pool): (Arc<dyn PersonaRepository>, Option<DuckdbPool>) =
            if config.memory_storage {
                info!("Using in-memory persona storage");
                (Arc::new(InMemoryPersonaRepository::new()), None)
            } else {
                let pool = DuckdbPool::open(&config.db_path, config.pool_size)?;
                let repo = DuckdbPersonaRepository::new(pool.clone()).await?;
                info!(
                    "Using DuckDB persona storage at {:?} ({} connections)",
                    config.db_path,
                    pool.size()
                );
                (Arc::new(repo), Some(pool))
            };

        let completion_client: Arc<dyn CompletionClient> = if config.mock_completions {
            info!("Using mock completion client");
            Arc::new(MockCompletion::new())
        } else {
            let Some(completion) = config.completion else {
                bail!("OPENAI_API_KEY is required unless --mock-completions is set");
            };
            let client = OpenAiClient::new(completion);
            info!("Using completion API at {} ({})", client.url(), client.model());
            Arc::new(client)
        };

        Ok(Self {
            persona_repo,
            completion_client,
            pool,
        })
    }

    /// Builds a container from ready-made services (no owned pool).
    pub fn with_services(
        persona_repo: Arc<dyn PersonaRepository>,
        completion_client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            persona_repo,
            completion_client,
            pool: None,
        }
    }

    pub fn create_persona_use_case(&self) -> CreatePersonaUseCase {
        CreatePersonaUseCase::new(self.persona_repo.clone())
    }

    pub fn get_persona_use_case(&self) -> GetPersonaUseCase {
        GetPersonaUseCase::new(self.persona_repo.clone())
    }

    pub fn chat_use_case(&self) -> ChatWithPersonaUseCase {
        ChatWithPersonaUseCase::new(self.persona_repo.clone(), self.completion_client.clone())
    }

    /// Closes the store pool, if this container owns one.
    pub fn shutdown(&self) {
        if let Some(pool) = &self.pool {
            pool.close();
            debug!("Persona store closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PersonaDraft, PersonaLinks};

    fn config(dir: &std::path::Path) -> ContainerConfig {
        ContainerConfig {
            db_path: dir.join("flirtlink.duckdb"),
            pool_size: 2,
            memory_storage: false,
            mock_completions: true,
            completion: None,
        }
    }

    #[tokio::test]
    async fn requires_completion_config_unless_mocked() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.memory_storage = true;
        cfg.mock_completions = false;

        assert!(Container::new(cfg).await.is_err());
    }

    #[tokio::test]
    async fn shutdown_closes_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let container = Container::new(config(dir.path())).await.unwrap();
        let draft = PersonaDraft::new("c1", "Lola", "flirty", PersonaLinks::new());
        container.create_persona_use_case().execute(draft.clone()).await.unwrap();

        container.shutdown();

        let err = container
            .create_persona_use_case()
            .execute(draft)
            .await
            .unwrap_err();
        assert!(err.is_storage_error());
    }
}
