use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use linedrop_core::{
    CursorProvider, Dispatch, DrainStop, KeyOutcome, LineDispatcher, LinedropConfig, SlotTable,
    Variant,
};

use crate::keys::{key_code, KeySpec};
use crate::mode::{AppMode, Pane};
use crate::paste::PasteBox;

/// Main application state
pub struct App<'a> {
    /// Current mode
    pub mode: AppMode,

    /// Which pane has focus
    pub focused_pane: Pane,

    /// Slot table and buffer, with the paste box as cursor provider
    session: LineDispatcher<PasteBox<'a>>,

    /// Selected cell (row, column) in the slot table
    pub selected: (usize, usize),

    /// Edit buffer for the selected cell
    pub edit_input: String,

    /// Command input buffer
    pub command_input: String,

    /// Status message (shown in command bar)
    pub status_message: Option<String>,

    /// Should quit?
    pub should_quit: bool,

    /// Most recent dispatch, for the status bar
    pub last_dispatch: Option<Dispatch>,

    /// Variant used by drain
    pub variant: Variant,

    pub reparse_key: KeySpec,
}

impl<'a> App<'a> {
    /// Create a new App from config
    pub fn new(config: &LinedropConfig) -> Result<Self> {
        let table = config.build_table().context("Invalid [table] config")?;
        let reparse_key: KeySpec = config
            .tui
            .reparse_key
            .parse()
            .context("Invalid tui.reparse_key")?;
        let paste = PasteBox::new(config.tui.placeholder.clone());

        Ok(Self {
            mode: AppMode::Paste,
            focused_pane: Pane::Paste,
            session: LineDispatcher::new(table, paste, config.dispatch_settings()),
            selected: (0, 0),
            edit_input: String::new(),
            command_input: String::new(),
            status_message: None,
            should_quit: false,
            last_dispatch: None,
            variant: config.dispatch.variant,
            reparse_key,
        })
    }

    pub fn paste(&self) -> &PasteBox<'a> {
        self.session.cursor()
    }

    pub fn paste_mut(&mut self) -> &mut PasteBox<'a> {
        self.session.cursor_mut()
    }

    pub fn table(&self) -> &SlotTable {
        self.session.table()
    }

    pub fn table_mut(&mut self) -> &mut SlotTable {
        self.session.table_mut()
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match self.mode {
            AppMode::Normal => self.handle_normal_mode(key),
            AppMode::Paste => self.handle_paste_mode(key),
            AppMode::SlotEdit => self.handle_slot_edit_mode(key),
            AppMode::Command => self.handle_command_mode(key),
        }
    }

    /// Handle a bracketed paste from the terminal
    pub fn handle_paste(&mut self, text: &str) {
        self.paste_mut().paste(text);
        self.mode = AppMode::Paste;
        self.focused_pane = Pane::Paste;
        self.status_message = Some(format!("{} lines in paste box", self.paste().line_count()));
    }

    /// Handle normal mode keys
    fn handle_normal_mode(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('q'), KeyModifiers::NONE) => {
                self.should_quit = true;
            }

            // Back to the paste box
            (KeyCode::Char('i'), KeyModifiers::NONE) | (KeyCode::Char('p'), KeyModifiers::NONE) => {
                self.mode = AppMode::Paste;
                self.focused_pane = Pane::Paste;
                self.status_message = Some("-- PASTE --".to_string());
            }

            // Enter command mode
            (KeyCode::Char(':'), _) => {
                self.mode = AppMode::Command;
                self.command_input.clear();
            }

            // Toggle pane focus
            (KeyCode::Tab, KeyModifiers::NONE) => {
                self.focused_pane = self.focused_pane.toggle();
            }

            // First-line dispatch from anywhere
            (KeyCode::Char('r'), KeyModifiers::NONE) => {
                self.reparse();
            }

            // Fill every empty slot
            (KeyCode::Char('d'), KeyModifiers::NONE) => {
                self.drain();
            }

            _ if self.focused_pane == Pane::Slots => self.handle_table_nav(key),

            _ => {}
        }
    }

    /// Cell navigation while the slot table has focus
    fn handle_table_nav(&mut self, key: KeyEvent) {
        let (row, col) = self.selected;
        let max_row = self.table().row_count().saturating_sub(1);
        let max_col = self.table().columns().len().saturating_sub(1);

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = (row.saturating_sub(1), col),
            KeyCode::Down | KeyCode::Char('j') => self.selected = ((row + 1).min(max_row), col),
            KeyCode::Left | KeyCode::Char('h') => self.selected = (row, col.saturating_sub(1)),
            KeyCode::Right | KeyCode::Char('l') => self.selected = (row, (col + 1).min(max_col)),

            KeyCode::Enter | KeyCode::Char('e') => {
                self.edit_input = self.table().cell(row, col).unwrap_or("").to_string();
                self.mode = AppMode::SlotEdit;
            }

            KeyCode::Char('x') | KeyCode::Delete => {
                self.table_mut().set_cell(row, col, "");
                self.status_message = Some(format!("Cleared row {}, {}", row + 1, self.column_name(col)));
            }

            _ => {}
        }
    }

    /// Handle paste mode keys
    fn handle_paste_mode(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.mode = AppMode::Normal;
            self.status_message = None;
            return;
        }

        if self.reparse_key.matches(&key) {
            self.reparse();
            return;
        }

        // Ctrl/Alt combinations always reach the text area (Alt-Enter inserts a newline)
        let plain = !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        if let Some(code) = key_code(&key).filter(|_| plain) {
            if self.on_key(code).is_consumed() {
                return;
            }
        }

        self.paste_mut().textarea.input(key);
    }

    /// Handle slot edit mode keys
    fn handle_slot_edit_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.edit_input.clear();
            }

            KeyCode::Enter => {
                let (row, col) = self.selected;
                let value = std::mem::take(&mut self.edit_input);
                self.table_mut().set_cell(row, col, &value);
                self.mode = AppMode::Normal;
            }

            KeyCode::Backspace => {
                self.edit_input.pop();
            }

            KeyCode::Char(c) => {
                self.edit_input.push(c);
            }

            _ => {}
        }
    }

    /// Handle command mode keys
    fn handle_command_mode(&mut self, key: KeyEvent) {
        match key.code {
            // Cancel command
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.command_input.clear();
            }

            // Execute command
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
                self.execute_command();
                self.command_input.clear();
            }

            KeyCode::Backspace => {
                self.command_input.pop();
            }

            KeyCode::Char(c) => {
                self.command_input.push(c);
            }

            _ => {}
        }
    }

    /// Execute a command
    fn execute_command(&mut self) {
        let cmd = self.command_input.trim().to_string();

        match cmd.as_str() {
            "q" | "quit" => {
                self.should_quit = true;
            }

            "reparse" | "r" => {
                self.reparse();
            }

            "drain" | "d" => {
                self.drain();
            }

            "clear" => {
                self.paste_mut().set_content("");
                self.status_message = Some("Paste box cleared".to_string());
            }

            "clear-slots" => {
                self.table_mut().clear_slots();
                self.status_message = Some("Slots cleared".to_string());
            }

            "clear-all" => {
                self.table_mut().clear();
                self.paste_mut().set_content("");
                self.status_message = Some("Cleared".to_string());
            }

            "variant cursor" => {
                self.variant = Variant::Cursor;
                self.status_message = Some("Drain splits at line ends".to_string());
            }

            "variant first-line" => {
                self.variant = Variant::FirstLine;
                self.status_message = Some("Drain takes complete first lines".to_string());
            }

            "" => {}

            _ => {
                self.status_message = Some(format!("Unknown command: {}", cmd));
            }
        }
    }

    /// Feed a key code to the session's commit-key gate
    pub fn on_key(&mut self, code: u32) -> KeyOutcome {
        self.sync_buffer();
        let outcome = self.session.on_key(code);
        if let KeyOutcome::Consumed(result) = &outcome {
            self.finish_dispatch(result.clone());
        }
        outcome
    }

    /// Cursor dispatch at the paste box cursor
    pub fn commit(&mut self) -> Dispatch {
        self.sync_buffer();
        let result = self.session.dispatch(Variant::Cursor);
        self.finish_dispatch(result)
    }

    /// First-line dispatch, wherever the cursor is
    pub fn reparse(&mut self) -> Dispatch {
        self.sync_buffer();
        let result = self.session.reparse();
        self.finish_dispatch(result)
    }

    /// Fill empty slots from the paste box until one of them runs out
    pub fn drain(&mut self) {
        self.sync_buffer();
        let report = self.session.drain(self.variant);
        self.write_back_buffer();

        let filled = report.filled.len();
        self.status_message = Some(match report.stopped {
            DrainStop::Exhausted => format!("Filled {} slots, paste box empty", filled),
            DrainStop::SlotsFull => format!("Filled {} slots, table full", filled),
            DrainStop::NoLineBreak => format!("Filled {} slots, last line kept", filled),
        });
    }

    /// Copy the paste box content into the session before a dispatch
    fn sync_buffer(&mut self) {
        let content = self.paste().content();
        self.session.set_buffer(content);
    }

    /// Copy the session buffer back into the paste box, cursor at the start
    fn write_back_buffer(&mut self) {
        let buffer = self.session.buffer().to_string();
        let paste = self.paste_mut();
        paste.set_content(&buffer);
        paste.reset_to_start();
    }

    fn finish_dispatch(&mut self, result: Dispatch) -> Dispatch {
        if result.buffer_changed {
            self.write_back_buffer();
        }

        self.status_message = Some(dispatch_status(&result));
        self.last_dispatch = Some(result.clone());
        result
    }

    pub fn column_name(&self, col: usize) -> &str {
        self.table()
            .columns()
            .get(col)
            .map(|c| c.name.as_str())
            .unwrap_or("?")
    }

    /// Poll for events with timeout
    pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

/// Status line for a dispatch
fn dispatch_status(result: &Dispatch) -> String {
    match (&result.line, result.updated_slot_index) {
        // An empty line leaves its slot empty
        (Some(line), _) if line.is_empty() => "Nothing before the cursor".to_string(),
        (Some(line), Some(index)) => format!("Slot {} <- {}", index + 1, line),
        (Some(_), None) => "No empty slot, line dropped".to_string(),
        (None, _) => "No complete line to take".to_string(),
    }
}
