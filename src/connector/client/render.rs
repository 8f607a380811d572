//! Translates [`App`] into ratatui widgets.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::{App, FormField, Screen};

const ACCENT: Color = Color::Magenta;

pub fn draw_ui(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::Create => draw_create(f, app),
        Screen::Chat => draw_chat(f, app),
    }

    if let Some(message) = &app.notification {
        draw_notification(f, message);
    }
}

fn draw_create(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Persona name
            Constraint::Length(6), // Personality prompt
            Constraint::Length(3), // OnlyFans link
            Constraint::Length(3), // Tip link
            Constraint::Length(1), // Help
            Constraint::Min(0),
        ])
        .split(f.area());

    let title = Paragraph::new("FlirtLink Agent Builder")
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(title, chunks[0]);

    for (field, area) in FormField::ALL.iter().zip(chunks[1..5].iter()) {
        let focused = app.form.focus == *field;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let widget = Paragraph::new(app.form.value(*field))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(field.label())
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
        f.render_widget(widget, *area);
    }

    let help = if app.busy {
        "Launching..."
    } else {
        "Tab: next field | Enter: launch my agent | Esc: quit"
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[5],
    );
}

fn draw_chat(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(3),    // Transcript
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status
        ])
        .split(f.area());

    let title = Paragraph::new(format!("Chat with {}", app.persona_name()))
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(title, chunks[0]);

    let inner_width = chunks[1].width.saturating_sub(2);
    let inner_height = chunks[1].height.saturating_sub(2);
    let scroll = transcript_scroll(&app.transcript, inner_width, inner_height);
    let transcript = Paragraph::new(app.transcript.join("\n"))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(transcript, chunks[1]);

    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().title("Type something...").borders(Borders::ALL));
    f.render_widget(input, chunks[2]);

    let status = if app.busy {
        "Talking..."
    } else {
        "Enter: send | Esc: quit"
    };
    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}

fn draw_notification(f: &mut Frame, message: &str) {
    let area = centered_rect(50, 5, f.area());
    f.render_widget(Clear, area);

    let popup = Paragraph::new(format!("{message}\n\n(Enter to dismiss)"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .title("Error")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(popup, area);
}

/// A rect `percent_x` wide and `height` rows tall, centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Rows to scroll so the newest transcript line stays visible.
///
/// Wrapping is estimated per character, which is exact for the ASCII-heavy
/// transcript and close enough otherwise.
pub fn transcript_scroll(lines: &[String], width: u16, height: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let width = width as usize;
    let total: usize = lines
        .iter()
        .flat_map(|entry| entry.split('\n'))
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();

    total.saturating_sub(height as usize).min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::connector::client::app::ApiEvent;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn scroll_is_zero_when_transcript_fits() {
        let lines = vec!["You: hi".to_string(), "Agent: hey".to_string()];
        assert_eq!(transcript_scroll(&lines, 40, 10), 0);
    }

    #[test]
    fn scroll_accounts_for_wrapped_lines() {
        let lines = vec!["x".repeat(25), "short".to_string()];
        // 25 chars at width 10 wrap to 3 rows, plus 1 row.
        assert_eq!(transcript_scroll(&lines, 10, 2), 2);
    }

    #[test]
    fn create_screen_shows_field_labels() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let app = App::new("c1");

        terminal.draw(|f| draw_ui(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("FlirtLink Agent Builder"));
        assert!(text.contains("OnlyFans Link"));
        assert!(text.contains("Tip Me Link"));
    }

    #[test]
    fn chat_screen_shows_transcript_and_notification() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::new("c1");
        app.form.persona_name = "Lola".to_string();
        app.submit_create();
        app.apply(ApiEvent::AgentCreated(Ok("agent-1".to_string())));
        app.transcript.push("You: hi".to_string());
        app.notification = Some("Error sending message".to_string());

        terminal.draw(|f| draw_ui(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Chat with Lola"));
        assert!(text.contains("You: hi"));
        assert!(text.contains("Error sending message"));
    }
}
