//! Terminal client for the persona chat service.
//!
//! Two screens (persona creation form, chat transcript) switched by the
//! app's screen flag. State lives only in process memory.

pub mod api_client;
pub mod app;
pub mod input;
pub mod render;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::info;

pub use api_client::PersonaApiClient;
pub use app::{Action, ApiEvent, App, Screen};
pub use input::handle_key_event;
pub use render::draw_ui;

pub struct ClientConfig {
    pub api_base: String,
    pub creator_id: String,
}

/// Takes over the terminal until the user quits.
pub async fn run(config: ClientConfig) -> Result<()> {
    let api = PersonaApiClient::new(config.api_base);
    info!("Terminal client talking to {}", api.base_url());

    let mut terminal = ratatui::try_init()?;
    let result = event_loop(&mut terminal, api, App::new(config.creator_id)).await;
    ratatui::try_restore()?;

    result
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    api: PersonaApiClient,
    mut app: App,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<ApiEvent>();
    let mut events = EventStream::new();

    while !app.should_quit {
        terminal.draw(|f| draw_ui(f, &app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    let action = handle_key_event(key, &mut app);
                    dispatch(action, &api, &tx);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = rx.recv() => app.apply(event),
        }
    }

    Ok(())
}

/// Runs the request for `action` in the background; its outcome comes back on `tx`.
fn dispatch(action: Action, api: &PersonaApiClient, tx: &mpsc::UnboundedSender<ApiEvent>) {
    match action {
        Action::None => {}
        Action::CreateAgent(request) => {
            let api = api.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api.create_agent(&request).await;
                let _ = tx.send(ApiEvent::AgentCreated(result));
            });
        }
        Action::SendChat {
            agent_id,
            user_input,
        } => {
            let api = api.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api.chat(&agent_id, &user_input).await;
                let _ = tx.send(ApiEvent::ChatReplied(result));
            });
        }
    }
}
