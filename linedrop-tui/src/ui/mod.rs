pub mod command_bar;
pub mod layout;
pub mod paste_panel;
pub mod slot_panel;
pub mod status_bar;

use ratatui::Frame;

use crate::app::App;

/// Render the entire UI
pub fn render(f: &mut Frame, app: &mut App) {
    // Get main layout areas
    let (status_area, content_area, command_area) = layout::Layout::main(f.area());

    status_bar::render(f, status_area, app);
    command_bar::render(f, command_area, app);

    // Paste box left, slots right
    let (paste_area, slot_area) = layout::Layout::panes(content_area);

    paste_panel::render(f, paste_area, app);
    slot_panel::render(f, slot_area, app);
}
