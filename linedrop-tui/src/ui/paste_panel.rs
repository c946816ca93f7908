use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

use crate::app::App;
use crate::mode::Pane;

/// Render the paste box
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    // Border color based on focus
    let border_color = if app.focused_pane == Pane::Paste {
        app.mode.color()
    } else {
        Color::DarkGray
    };

    let title = format!(" Paste ({} lines) ", app.paste().line_count());
    app.paste_mut().textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color)),
    );

    f.render_widget(&app.paste().textarea, area);
}
