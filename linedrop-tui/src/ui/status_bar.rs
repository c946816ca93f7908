use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::mode::Pane;

/// Render the status bar (top bar)
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let time_str = Local::now().format("%H:%M:%S").to_string();

    let mut spans = vec![
        // Mode indicator
        Span::styled(
            format!(" {} ", app.mode.display_name()),
            Style::default()
                .fg(Color::Black)
                .bg(app.mode.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("{}/{} slots", app.table().filled_count(), app.table().slot_count()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(
            format!("drain: {}", app.variant),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" "),
    ];

    let pane_indicator = match app.focused_pane {
        Pane::Paste => "[PASTE]",
        Pane::Slots => "[SLOTS]",
    };
    spans.push(Span::styled(pane_indicator, Style::default().fg(Color::DarkGray)));

    // Right-aligned time
    let width = area.width as usize;
    let current_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding = width.saturating_sub(current_len + time_str.len() + 2);

    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(
        format!("{} ", time_str),
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(paragraph, area);
}
