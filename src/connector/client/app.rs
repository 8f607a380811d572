//! Terminal client state.
//!
//! Pure state transitions; all I/O happens in the event loop, which turns
//! [`Action`]s into HTTP calls and feeds their outcomes back as [`ApiEvent`]s.

use tracing::warn;

use crate::connector::api::{ChatResponse, CreateAgentRequest};
use crate::domain::{DomainError, PersonaLinks};

pub const DEFAULT_CREATOR_ID: &str = "demo-123";
pub const CREATE_FAILED: &str = "Error creating agent";
pub const CHAT_FAILED: &str = "Error sending message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Create,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    PersonaName,
    Prompt,
    OnlyFansLink,
    TipLink,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::PersonaName,
        FormField::Prompt,
        FormField::OnlyFansLink,
        FormField::TipLink,
    ];

    pub fn next(self) -> Self {
        match self {
            FormField::PersonaName => FormField::Prompt,
            FormField::Prompt => FormField::OnlyFansLink,
            FormField::OnlyFansLink => FormField::TipLink,
            FormField::TipLink => FormField::PersonaName,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::PersonaName => FormField::TipLink,
            FormField::Prompt => FormField::PersonaName,
            FormField::OnlyFansLink => FormField::Prompt,
            FormField::TipLink => FormField::OnlyFansLink,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::PersonaName => "Your Agent Name",
            FormField::Prompt => "Describe your personality (flirty, bratty, shy...)",
            FormField::OnlyFansLink => "OnlyFans Link",
            FormField::TipLink => "Tip Me Link",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    pub persona_name: String,
    pub prompt: String,
    pub onlyfans_link: String,
    pub tip_link: String,
    pub focus: FormField,
}

impl CreateForm {
    pub fn new() -> Self {
        Self {
            persona_name: String::new(),
            prompt: String::new(),
            onlyfans_link: String::new(),
            tip_link: String::new(),
            focus: FormField::PersonaName,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::PersonaName => &self.persona_name,
            FormField::Prompt => &self.prompt,
            FormField::OnlyFansLink => &self.onlyfans_link,
            FormField::TipLink => &self.tip_link,
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::PersonaName => &mut self.persona_name,
            FormField::Prompt => &mut self.prompt,
            FormField::OnlyFansLink => &mut self.onlyfans_link,
            FormField::TipLink => &mut self.tip_link,
        }
    }

    /// Both link fields are always sent, even when left blank.
    pub fn to_request(&self, creator_id: &str) -> CreateAgentRequest {
        let links = PersonaLinks::from([
            ("onlyfans".to_string(), self.onlyfans_link.clone()),
            ("tip".to_string(), self.tip_link.clone()),
        ]);

        CreateAgentRequest {
            creator_id: creator_id.to_string(),
            persona_name: self.persona_name.clone(),
            personality_prompt: self.prompt.clone(),
            links,
        }
    }
}

impl Default for CreateForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Work the event loop must perform after a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    CreateAgent(CreateAgentRequest),
    SendChat { agent_id: String, user_input: String },
}

/// Outcome of a request started by an [`Action`].
#[derive(Debug)]
pub enum ApiEvent {
    AgentCreated(Result<String, DomainError>),
    ChatReplied(Result<ChatResponse, DomainError>),
}

pub struct App {
    pub screen: Screen,
    pub creator_id: String,
    pub form: CreateForm,
    pub agent_id: Option<String>,
    pub transcript: Vec<String>,
    pub input: String,
    /// Set while a request is outstanding; submits are ignored meanwhile.
    pub busy: bool,
    /// Blocking notification; must be dismissed before anything else.
    pub notification: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(creator_id: impl Into<String>) -> Self {
        Self {
            screen: Screen::Create,
            creator_id: creator_id.into(),
            form: CreateForm::new(),
            agent_id: None,
            transcript: Vec::new(),
            input: String::new(),
            busy: false,
            notification: None,
            should_quit: false,
        }
    }

    pub fn submit_create(&mut self) -> Action {
        if self.busy {
            return Action::None;
        }
        self.busy = true;
        Action::CreateAgent(self.form.to_request(&self.creator_id))
    }

    /// Appends the user's line right away; the reply is appended when it arrives.
    pub fn submit_chat(&mut self) -> Action {
        if self.busy || self.input.is_empty() {
            return Action::None;
        }
        let Some(agent_id) = self.agent_id.clone() else {
            return Action::None;
        };

        self.transcript.push(format!("You: {}", self.input));
        self.busy = true;
        Action::SendChat {
            agent_id,
            user_input: self.input.clone(),
        }
    }

    pub fn apply(&mut self, event: ApiEvent) {
        self.busy = false;
        match event {
            ApiEvent::AgentCreated(Ok(agent_id)) => {
                self.agent_id = Some(agent_id);
                self.screen = Screen::Chat;
            }
            ApiEvent::AgentCreated(Err(e)) => {
                warn!("Create agent failed: {}", e);
                self.notification = Some(CREATE_FAILED.to_string());
            }
            ApiEvent::ChatReplied(Ok(response)) => {
                self.transcript.push(format!("Agent: {}", response.reply));
                self.input.clear();
            }
            ApiEvent::ChatReplied(Err(e)) => {
                warn!("Chat failed: {}", e);
                self.notification = Some(CHAT_FAILED.to_string());
            }
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn persona_name(&self) -> &str {
        &self.form.persona_name
    }
}
