use async_trait::async_trait;
use duckdb::{params, Connection};
use tracing::debug;

use crate::application::PersonaRepository;
use crate::domain::{DomainError, Persona, PersonaDraft, PersonaLinks};

use super::DuckdbPool;

/// Persona storage in the `agents` table. Every call holds one pooled
/// connection for the duration of a single statement.
pub struct DuckdbPersonaRepository {
    pool: DuckdbPool,
}

impl DuckdbPersonaRepository {
    /// Wraps the pool and creates the `agents` table if it does not exist yet.
    pub async fn new(pool: DuckdbPool) -> Result<Self, DomainError> {
        let conn = pool.acquire().await?;
        Self::initialize_schema(&conn)?;
        drop(conn);

        Ok(Self { pool })
    }

    /// Returns a handle to the underlying pool, e.g. to close it on shutdown.
    pub fn pool(&self) -> DuckdbPool {
        self.pool.clone()
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS agents (
                id TEXT PRIMARY KEY,
                creator_id TEXT,
                persona_name TEXT NOT NULL,
                prompt TEXT NOT NULL,
                links TEXT
            );
            "#,
        )
        .map_err(|e| DomainError::storage(format!("Failed to initialize schema: {}", e)))?;

        debug!("DuckDB agents schema initialized");
        Ok(())
    }

    fn serialize_links(links: &PersonaLinks) -> Result<String, DomainError> {
        serde_json::to_string(links)
            .map_err(|e| DomainError::storage(format!("Failed to serialize links: {}", e)))
    }

    fn deserialize_links(json: Option<String>) -> Result<PersonaLinks, DomainError> {
        match json {
            Some(s) => serde_json::from_str(&s)
                .map_err(|e| DomainError::storage(format!("Stored links are not a string map: {}", e))),
            None => Ok(PersonaLinks::new()),
        }
    }
}

#[async_trait]
impl PersonaRepository for DuckdbPersonaRepository {
    async fn create(&self, draft: PersonaDraft) -> Result<String, DomainError> {
        let persona = Persona::new(draft);
        let links_json = Self::serialize_links(persona.links())?;

        let conn = self.pool.acquire().await?;
        conn.execute(
            "INSERT INTO agents (id, creator_id, persona_name, prompt, links) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                persona.id(),
                persona.owner_id(),
                persona.display_name(),
                persona.behavior_prompt(),
                links_json,
            ],
        )
        .map_err(|e| DomainError::storage(format!("Failed to save persona: {}", e)))?;

        debug!("Stored persona {}", persona.id());
        Ok(persona.id().to_string())
    }

    async fn get(&self, id: &str) -> Result<Option<Persona>, DomainError> {
        let conn = self.pool.acquire().await?;
        let mut stmt = conn
            .prepare(
                "SELECT id, creator_id, persona_name, prompt, links FROM agents WHERE id = ?1",
            )
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let row = stmt.query_row(params![id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        });

        match row {
            Ok((id, creator_id, persona_name, prompt, links_json)) => Ok(Some(Persona::reconstitute(
                id,
                creator_id.unwrap_or_default(),
                persona_name,
                prompt,
                Self::deserialize_links(links_json)?,
            ))),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to query persona: {}",
                e
            ))),
        }
    }
}
