use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::application::PersonaRepository;
use crate::domain::{DomainError, Persona, PersonaDraft};

/// Process-local persona storage. Contents are lost on exit.
pub struct InMemoryPersonaRepository {
    personas: Arc<RwLock<HashMap<String, Persona>>>,
}

impl InMemoryPersonaRepository {
    pub fn new() -> Self {
        Self {
            personas: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.personas.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.personas.read().await.is_empty()
    }
}

impl Default for InMemoryPersonaRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonaRepository for InMemoryPersonaRepository {
    async fn create(&self, draft: PersonaDraft) -> Result<String, DomainError> {
        let persona = Persona::new(draft);
        let id = persona.id().to_string();

        let mut personas = self.personas.write().await;
        if personas.contains_key(&id) {
            return Err(DomainError::storage(format!("Duplicate persona id: {}", id)));
        }
        personas.insert(id.clone(), persona);

        debug!("Stored persona {} in memory", id);
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<Persona>, DomainError> {
        Ok(self.personas.read().await.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PersonaLinks;

    #[tokio::test]
    async fn create_then_get() {
        let repo = InMemoryPersonaRepository::new();
        assert!(repo.is_empty().await);

        let links = PersonaLinks::from([("tip".to_string(), "https://tips.example/lola".to_string())]);
        let id = repo
            .create(PersonaDraft::new("c1", "Lola", "flirty", links.clone()))
            .await
            .unwrap();

        let persona = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(persona.links(), &links);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let repo = InMemoryPersonaRepository::new();
        assert!(repo.get("nope").await.unwrap().is_none());
    }
}
