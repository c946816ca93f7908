use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::mode::AppMode;

/// Render the command bar (bottom bar)
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.mode {
        AppMode::Command => Line::from(vec![
            Span::styled(":", Style::default().fg(Color::Yellow)),
            Span::raw(app.command_input.as_str()),
            Span::styled("_", Style::default().fg(Color::Green)), // Cursor
        ]),

        AppMode::SlotEdit => Line::from(vec![
            Span::styled(
                format!("{}: ", app.column_name(app.selected.1)),
                Style::default().fg(Color::Magenta),
            ),
            Span::raw(app.edit_input.as_str()),
            Span::styled("_", Style::default().fg(Color::Green)),
        ]),

        AppMode::Normal | AppMode::Paste => {
            if let Some(ref msg) = app.status_message {
                Line::from(msg.as_str())
            } else {
                let hints = match app.mode {
                    AppMode::Normal => "i: paste | r: first line | d: drain | Tab: switch pane | :: command | q: quit"
                        .to_string(),
                    _ => format!(
                        "Enter: dispatch line | {}: first line | Esc: normal",
                        app.reparse_key
                    ),
                };

                Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
            }
        }
    };

    f.render_widget(Paragraph::new(content), area);
}
