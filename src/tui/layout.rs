//! Single-screen kiosk layout.
//!
//! ```text
//! ┌─ Attendance Kiosk ── http://127.0.0.1:5000 ────┐
//! │ [Live]                                          │
//! │ Feed:  http://127.0.0.1:5000/video_feed         │
//! │ Name:  Alice            Faces: 1                │
//! ├─ Register ──────────────────────────────────────┤
//! │ > Alice_                                        │
//! ├─────────────────────────────────────────────────┤
//! │ ✅ Attendance marked for Alice                  │
//! ├─────────────────────────────────────────────────┤
//! │ s:Start x:Stop r:Name t:Train m:Mark ...        │
//! └─────────────────────────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::app::{InputMode, KioskApp};

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &KioskApp) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // camera panel
            Constraint::Length(3), // name field
            Constraint::Length(3), // toast
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    draw_camera(f, app, outer[0]);
    draw_name_input(f, app, outer[1]);
    draw_toast(f, app, outer[2]);
    draw_status(f, app, outer[3]);
}

fn chip_style(app: &KioskApp) -> Style {
    let color = if !app.is_live() {
        Color::DarkGray
    } else if app.chip.starts_with("Recognized") {
        Color::Green
    } else if app.chip.contains("Multiple") || app.chip.starts_with("Unknown") {
        Color::Red
    } else {
        Color::Yellow
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn draw_camera(f: &mut Frame, app: &KioskApp, area: Rect) {
    let block = Block::default()
        .title(format!(" Attendance Kiosk ── {} ", app.backend_url))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let label = Style::default().fg(Color::DarkGray);
    let feed = match &app.video_source {
        Some(src) => Span::raw(src.clone()),
        None => Span::styled("(camera off)", label),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("[", label),
            Span::styled(app.chip.clone(), chip_style(app)),
            Span::styled("]", label),
        ]),
        Line::from(vec![Span::styled("Feed:  ", label), feed]),
        Line::from(vec![
            Span::styled("Name:  ", label),
            Span::styled(
                format!("{:<20}", app.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("Faces: ", label),
            Span::raw(app.faces.clone()),
        ]),
    ];

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_name_input(f: &mut Frame, app: &KioskApp, area: Rect) {
    let editing = app.input_mode == InputMode::EditingName;
    let border = if editing { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .title(" Register (r to edit, Enter to capture) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);

    let text = Line::from(vec![Span::raw("> "), Span::raw(app.name_input.clone())]);
    f.render_widget(Paragraph::new(text).block(block), area);

    if editing {
        f.set_cursor_position(name_cursor(inner, &app.name_input));
    }
}

/// Cursor after the "> " prompt, clamped to the field.
fn name_cursor(inner: Rect, input: &str) -> Position {
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    let x = inner.x.saturating_add(2).saturating_add(typed);
    Position::new(x.min(inner.right().saturating_sub(1)), inner.y)
}

fn draw_toast(f: &mut Frame, app: &KioskApp, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let text = match &app.toast {
        Some(msg) => Line::from(Span::styled(
            msg.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_status(f: &mut Frame, app: &KioskApp, area: Rect) {
    let mut spans = vec![Span::styled(
        " s:Start x:Stop r:Name t:Train m:Mark d:Report v:Video q:Quit",
        Style::default().fg(Color::DarkGray),
    )];
    if app.poll_failures > 0 {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[poll errors: {}]", app.poll_failures),
            Style::default().fg(Color::Red),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(app: &KioskApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 14)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn draws_live_camera_readouts() {
        let mut app = KioskApp::new("http://kiosk.lan");
        app.chip = "Recognized: Alice".into();
        app.name = "Alice".into();
        app.faces = "1".into();
        app.video_source = Some("http://kiosk.lan/video_feed".into());
        app.toast = Some("Done".into());

        let text = screen_text(&app);
        assert!(text.contains("Recognized: Alice"));
        assert!(text.contains("http://kiosk.lan/video_feed"));
        assert!(text.contains("Faces: 1"));
        assert!(text.contains("Done"));
    }

    #[test]
    fn name_cursor_clamped_to_field() {
        let inner = Rect::new(1, 5, 20, 1);
        assert_eq!(name_cursor(inner, "Al"), Position::new(5, 5));

        let long = "x".repeat(70_000);
        assert_eq!(name_cursor(inner, &long), Position::new(20, 5));

        let edge = Rect::new(u16::MAX - 3, 0, 3, 1);
        assert_eq!(name_cursor(edge, "Alice"), Position::new(u16::MAX - 1, 0));
    }

    #[test]
    fn draws_while_editing_long_name() {
        let mut app = KioskApp::new("http://kiosk.lan");
        app.input_mode = InputMode::EditingName;
        app.name_input = "A".repeat(500);
        let text = screen_text(&app);
        assert!(text.contains("> AAAA"));
    }

    #[test]
    fn draws_poll_error_count() {
        let mut app = KioskApp::new("http://kiosk.lan");
        app.poll_failures = 3;
        let text = screen_text(&app);
        assert!(text.contains("(camera off)"));
        assert!(text.contains("[poll errors: 3]"));
    }
}
