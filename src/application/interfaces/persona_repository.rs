use async_trait::async_trait;

use crate::domain::{DomainError, Persona, PersonaDraft};

/// Append-only persistence for personas. There is no update or delete.
#[async_trait]
pub trait PersonaRepository: Send + Sync {
    /// Assigns a fresh identifier, persists the record, and returns the identifier.
    ///
    /// Either the whole record is stored or nothing is.
    async fn create(&self, draft: PersonaDraft) -> Result<String, DomainError>;

    /// `Ok(None)` means the persona does not exist; connectivity and query
    /// failures are reported as `StorageError`.
    async fn get(&self, id: &str) -> Result<Option<Persona>, DomainError>;
}
