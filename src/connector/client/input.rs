//! Keyboard input handling for the terminal client.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{Action, App, Screen};

/// Applies one key press to `app` and returns the request it triggers, if any.
pub fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Action::None;
    }

    if app.notification.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_notification();
        }
        return Action::None;
    }

    if key.code == KeyCode::Esc {
        app.should_quit = true;
        return Action::None;
    }

    match app.screen {
        Screen::Create => match key.code {
            KeyCode::Tab | KeyCode::Down => {
                app.form.focus = app.form.focus.next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.form.focus = app.form.focus.prev();
                Action::None
            }
            KeyCode::Enter => app.submit_create(),
            KeyCode::Backspace => {
                app.form.focused_mut().pop();
                Action::None
            }
            KeyCode::Char(c) => {
                app.form.focused_mut().push(c);
                Action::None
            }
            _ => Action::None,
        },
        Screen::Chat => match key.code {
            KeyCode::Enter => app.submit_chat(),
            KeyCode::Backspace => {
                app.input.pop();
                Action::None
            }
            KeyCode::Char(c) => {
                app.input.push(c);
                Action::None
            }
            _ => Action::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::client::app::{ApiEvent, FormField};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key_event(press(KeyCode::Char(c)), app);
        }
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let mut app = App::new("c1");
        type_text(&mut app, "Lola");
        handle_key_event(press(KeyCode::Tab), &mut app);
        type_text(&mut app, "bratty");
        handle_key_event(press(KeyCode::Backspace), &mut app);

        assert_eq!(app.form.persona_name, "Lola");
        assert_eq!(app.form.prompt, "bratt");
        assert_eq!(app.form.focus, FormField::Prompt);
    }

    #[test]
    fn enter_on_form_requests_creation() {
        let mut app = App::new("c1");
        type_text(&mut app, "Lola");

        let action = handle_key_event(press(KeyCode::Enter), &mut app);
        assert!(matches!(action, Action::CreateAgent(ref r) if r.persona_name == "Lola"));
    }

    #[test]
    fn notification_swallows_keys_until_dismissed() {
        let mut app = App::new("c1");
        app.submit_create();
        app.apply(ApiEvent::AgentCreated(Err(crate::domain::DomainError::upstream("x"))));

        type_text(&mut app, "abc");
        assert!(app.form.persona_name.is_empty());
        assert!(!app.should_quit);

        handle_key_event(press(KeyCode::Esc), &mut app);
        assert!(app.notification.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_even_with_notification() {
        let mut app = App::new("c1");
        app.notification = Some("x".to_string());

        handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut app);
        assert!(app.should_quit);
    }

    #[test]
    fn enter_in_chat_sends_message() {
        let mut app = App::new("c1");
        app.submit_create();
        app.apply(ApiEvent::AgentCreated(Ok("agent-1".to_string())));
        type_text(&mut app, "hi");

        let action = handle_key_event(press(KeyCode::Enter), &mut app);
        assert!(matches!(action, Action::SendChat { ref user_input, .. } if user_input == "hi"));
    }
}
