use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};
use tui_textarea::{CursorMove, TextArea};

use linedrop_core::{CursorKind, CursorProvider};

/// The multi-line paste box.
///
/// Wraps a `TextArea` and reports its cursor as a character offset into the
/// `\n`-joined content, which is what the dispatch functions expect.
pub struct PasteBox<'a> {
    pub textarea: TextArea<'a>,
    placeholder: String,
}

impl<'a> PasteBox<'a> {
    pub fn new(placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(placeholder.clone());
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Paste ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );

        Self {
            textarea,
            placeholder,
        }
    }

    /// Current content, lines joined with `\n`
    pub fn content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Replace the content, keeping block and cursor styling
    pub fn set_content(&mut self, content: &str) {
        let mut new_textarea = TextArea::from(content.split('\n').map(|s| s.to_string()));

        new_textarea.set_placeholder_text(self.placeholder.clone());
        new_textarea.set_block(self.textarea.block().cloned().unwrap_or_default());
        new_textarea.set_cursor_style(self.textarea.cursor_style());

        self.textarea = new_textarea;
    }

    /// Insert pasted text at the cursor, normalizing line breaks
    pub fn paste(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        self.textarea.insert_str(normalized);
    }

    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(|line| line.is_empty())
    }

    pub fn line_count(&self) -> usize {
        self.textarea
            .lines()
            .iter()
            .filter(|line| !line.trim().is_empty())
            .count()
    }
}

impl CursorProvider for PasteBox<'_> {
    /// Selection start when text is selected, otherwise the caret
    fn cursor_offset(&self) -> usize {
        let (row, col) = self
            .textarea
            .selection_range()
            .map(|(start, _)| start)
            .unwrap_or_else(|| self.textarea.cursor());
        let before: usize = self
            .textarea
            .lines()
            .iter()
            .take(row)
            .map(|line| line.chars().count() + 1)
            .sum();
        before + col
    }

    fn reset_to_start(&mut self) {
        self.textarea.cancel_selection();
        self.textarea.move_cursor(CursorMove::Top);
        self.textarea.move_cursor(CursorMove::Head);
    }

    fn kind(&self) -> CursorKind {
        CursorKind::Range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_offset_counts_line_breaks() {
        let mut paste = PasteBox::new("");
        paste.set_content("abc\ndef\nghi");
        assert_eq!(paste.cursor_offset(), 0);

        paste.textarea.move_cursor(CursorMove::Jump(1, 2));
        assert_eq!(paste.cursor_offset(), 6);

        paste.reset_to_start();
        assert_eq!(paste.cursor_offset(), 0);
    }

    #[test]
    fn test_cursor_offset_uses_selection_start() {
        let mut paste = PasteBox::new("");
        paste.set_content("abc def\nxyz");

        paste.textarea.start_selection();
        for _ in 0..3 {
            paste.textarea.move_cursor(CursorMove::Forward);
        }
        assert_eq!(paste.textarea.cursor(), (0, 3));
        assert_eq!(paste.cursor_offset(), 0);

        // Backward selection: the start is where the caret now sits
        paste.textarea.cancel_selection();
        paste.textarea.move_cursor(CursorMove::Jump(1, 2));
        paste.textarea.start_selection();
        paste.textarea.move_cursor(CursorMove::Jump(0, 4));
        assert_eq!(paste.cursor_offset(), 4);

        paste.reset_to_start();
        assert!(paste.textarea.selection_range().is_none());
        assert_eq!(paste.cursor_offset(), 0);
    }

    #[test]
    fn test_cursor_offset_multibyte() {
        let mut paste = PasteBox::new("");
        paste.set_content("héllo\nwörld");
        paste.textarea.move_cursor(CursorMove::Jump(1, 1));
        assert_eq!(paste.cursor_offset(), 7);
    }

    #[test]
    fn test_paste_normalizes_breaks() {
        let mut paste = PasteBox::new("");
        paste.paste("one\r\ntwo\rthree");

        assert_eq!(paste.content(), "one\ntwo\nthree");
        assert_eq!(paste.line_count(), 3);
    }

    #[test]
    fn test_set_content_empty() {
        let mut paste = PasteBox::new("");
        paste.set_content("");
        assert!(paste.is_empty());
        assert_eq!(paste.content(), "");
    }
}
