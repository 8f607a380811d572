use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Open mapping from a creator-chosen label (e.g. `"onlyfans"`, `"tip"`) to a URL.
///
/// No keys are required; the map is stored and returned verbatim.
pub type PersonaLinks = BTreeMap<String, String>;

/// Everything a creator supplies when defining a persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaDraft {
    pub owner_id: String,
    pub display_name: String,
    pub behavior_prompt: String,
    #[serde(default)]
    pub links: PersonaLinks,
}

impl PersonaDraft {
    pub fn new(
        owner_id: impl Into<String>,
        display_name: impl Into<String>,
        behavior_prompt: impl Into<String>,
        links: PersonaLinks,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            display_name: display_name.into(),
            behavior_prompt: behavior_prompt.into(),
            links,
        }
    }
}

/// A stored chat persona. Write-once: there are no mutators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    id: String,
    owner_id: String,
    display_name: String,
    behavior_prompt: String,
    links: PersonaLinks,
}

impl Persona {
    /// Assigns a fresh identifier to the draft.
    pub fn new(draft: PersonaDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: draft.owner_id,
            display_name: draft.display_name,
            behavior_prompt: draft.behavior_prompt,
            links: draft.links,
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    pub fn reconstitute(
        id: String,
        owner_id: String,
        display_name: String,
        behavior_prompt: String,
        links: PersonaLinks,
    ) -> Self {
        Self {
            id,
            owner_id,
            display_name,
            behavior_prompt,
            links,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn behavior_prompt(&self) -> &str {
        &self.behavior_prompt
    }

    pub fn links(&self) -> &PersonaLinks {
        &self.links
    }

    pub fn into_links(self) -> PersonaLinks {
        self.links
    }

    pub fn summary(&self) -> String {
        format!(
            "{} ({}, {} links)",
            self.display_name,
            self.id,
            self.links.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lola_links() -> PersonaLinks {
        PersonaLinks::from([
            ("onlyfans".to_string(), "url1".to_string()),
            ("tip".to_string(), "url2".to_string()),
        ])
    }

    #[test]
    fn test_persona_creation_copies_draft() {
        let draft = PersonaDraft::new("c1", "Lola", "flirty and playful", lola_links());
        let persona = Persona::new(draft);

        assert_eq!(persona.owner_id(), "c1");
        assert_eq!(persona.display_name(), "Lola");
        assert_eq!(persona.behavior_prompt(), "flirty and playful");
        assert_eq!(persona.links(), &lola_links());
        assert!(Uuid::parse_str(persona.id()).is_ok());
    }

    #[test]
    fn test_each_persona_gets_its_own_id() {
        let draft = PersonaDraft::new("c1", "Lola", "flirty", PersonaLinks::new());
        let a = Persona::new(draft.clone());
        let b = Persona::new(draft);

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_draft_links_default_to_empty() {
        let draft: PersonaDraft = serde_json::from_str(
            r#"{"owner_id":"c1","display_name":"Lola","behavior_prompt":"shy"}"#,
        )
        .unwrap();

        assert!(draft.links.is_empty());
    }

    #[test]
    fn test_summary() {
        let persona = Persona::reconstitute(
            "abc".to_string(),
            "c1".to_string(),
            "Lola".to_string(),
            "flirty".to_string(),
            lola_links(),
        );

        assert_eq!(persona.summary(), "Lola (abc, 2 links)");
    }
}
