/// Application modes (vim-inspired)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppMode {
    /// Navigate between the paste box and the slot table
    Normal,

    /// Type or paste into the paste box; the commit key dispatches
    Paste,

    /// Edit the selected table cell by hand
    SlotEdit,

    /// Command input (vim : mode)
    Command,
}

impl AppMode {
    /// Get display name for status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            AppMode::Normal => "NORMAL",
            AppMode::Paste => "PASTE",
            AppMode::SlotEdit => "EDIT",
            AppMode::Command => "COMMAND",
        }
    }

    /// Get color for status bar (in ratatui Color enum)
    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            AppMode::Normal => Color::Cyan,
            AppMode::Paste => Color::Green,
            AppMode::SlotEdit => Color::Magenta,
            AppMode::Command => Color::Yellow,
        }
    }
}

/// Which pane has focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    /// Left pane (paste box)
    Paste,

    /// Right pane (slot table)
    Slots,
}

impl Pane {
    /// Toggle between panes
    pub fn toggle(&self) -> Self {
        match self {
            Pane::Paste => Pane::Slots,
            Pane::Slots => Pane::Paste,
        }
    }
}
