use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cursor::CursorProvider;
use crate::dispatch::{dispatch, Dispatch, Variant};
use crate::slots::SlotTable;
use crate::text::first_line_end;

/// Key code of Enter, the default commit key
pub const ENTER_KEY_CODE: u32 = 13;

/// Trigger settings for a dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSettings {
    /// Key code that triggers a cursor dispatch
    pub commit_key: u32,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            commit_key: ENTER_KEY_CODE,
        }
    }
}

/// Result of feeding a key press to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not the commit key; the host handles the key normally
    Ignored,
    /// Commit key: a dispatch ran and the host must suppress the key's default effect
    Consumed(Dispatch),
}

impl KeyOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, KeyOutcome::Consumed(_))
    }
}

/// Why a drain stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrainStop {
    /// Buffer is empty
    Exhausted,
    /// Every slot holds a value
    SlotsFull,
    /// Text remains but has no line break (first-line variant only)
    NoLineBreak,
}

/// Summary of a drain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainReport {
    /// (slot index, line) for every line that landed in a slot
    pub filled: Vec<(usize, String)>,
    pub remaining: String,
    pub stopped: DrainStop,
}

/// A paste box bound to a slot table.
///
/// Holds the state a host would otherwise keep in its widgets and applies each
/// [`Dispatch`] back to it: the slot value, the buffer and the cursor.
pub struct LineDispatcher<C> {
    buffer: String,
    table: SlotTable,
    cursor: C,
    settings: DispatchSettings,
}

impl<C: CursorProvider> LineDispatcher<C> {
    pub fn new(table: SlotTable, cursor: C, settings: DispatchSettings) -> Self {
        Self {
            buffer: String::new(),
            table,
            cursor,
            settings,
        }
    }

    pub fn with_buffer(mut self, buffer: impl Into<String>) -> Self {
        self.buffer = buffer.into();
        self
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn set_buffer(&mut self, buffer: impl Into<String>) {
        self.buffer = buffer.into();
    }

    pub fn table(&self) -> &SlotTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut SlotTable {
        &mut self.table
    }

    pub fn cursor(&self) -> &C {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut C {
        &mut self.cursor
    }

    pub fn settings(&self) -> DispatchSettings {
        self.settings
    }

    /// Cursor dispatch gated on the commit key
    pub fn on_key(&mut self, key_code: u32) -> KeyOutcome {
        if key_code != self.settings.commit_key {
            trace!(key_code, "ignoring non-commit key");
            return KeyOutcome::Ignored;
        }
        KeyOutcome::Consumed(self.dispatch(Variant::Cursor))
    }

    /// First-line dispatch, independent of the cursor
    pub fn reparse(&mut self) -> Dispatch {
        self.dispatch(Variant::FirstLine)
    }

    /// Run one dispatch of `variant` and apply it
    pub fn dispatch(&mut self, variant: Variant) -> Dispatch {
        let offset = self.cursor.cursor_offset();
        self.dispatch_with_offset(variant, offset)
    }

    /// Dispatch repeatedly until the buffer or the slots run out.
    ///
    /// The cursor variant places the cursor at the end of the first line before
    /// each step, as a user pressing End then Enter would.
    pub fn drain(&mut self, variant: Variant) -> DrainReport {
        let mut filled = Vec::new();

        let stopped = loop {
            if self.buffer.trim().is_empty() {
                break DrainStop::Exhausted;
            }
            if self.table.first_empty().is_none() {
                break DrainStop::SlotsFull;
            }

            let before = self.buffer.clone();
            let offset = match variant {
                Variant::Cursor => first_line_end(self.buffer.trim_start()) + leading_chars(&self.buffer),
                Variant::FirstLine => 0,
            };
            let result = self.dispatch_with_offset(variant, offset);

            match (result.updated_slot_index, result.line) {
                (Some(index), Some(line)) if !line.is_empty() => filled.push((index, line)),
                (_, None) => break DrainStop::NoLineBreak,
                _ => {}
            }

            if self.buffer == before {
                break DrainStop::NoLineBreak;
            }
        };

        debug!(
            variant = %variant,
            filled = filled.len(),
            remaining = self.buffer.len(),
            ?stopped,
            "drain finished"
        );

        DrainReport {
            filled,
            remaining: self.buffer.clone(),
            stopped,
        }
    }

    fn dispatch_with_offset(&mut self, variant: Variant, offset: usize) -> Dispatch {
        let slots = self.table.slot_values();
        let result = dispatch(variant, &self.buffer, offset, &slots);

        self.table.apply(&result);
        if result.buffer_changed {
            self.buffer = result.updated_buffer.clone();
            self.cursor.reset_to_start();
        }

        if result.dropped_line() {
            debug!(variant = %variant, "no empty slot, line discarded");
        }
        debug!(
            variant = %variant,
            cursor = %self.cursor.kind(),
            offset,
            slot = ?result.updated_slot_index,
            remaining = self.buffer.len(),
            "dispatched"
        );

        result
    }
}

/// Characters of leading whitespace
fn leading_chars(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{LegacySelection, NoSelection, SelectionRange};

    fn dispatcher<C: CursorProvider>(cursor: C, slots: usize, buffer: &str) -> LineDispatcher<C> {
        let table = SlotTable::from_values(vec![""; slots]);
        LineDispatcher::new(table, cursor, DispatchSettings::default()).with_buffer(buffer)
    }

    #[test]
    fn test_non_commit_key_has_no_effect() {
        let mut d = dispatcher(SelectionRange::caret(3), 2, "abc\ndef");

        assert_eq!(d.on_key(65), KeyOutcome::Ignored);
        assert_eq!(d.buffer(), "abc\ndef");
        assert_eq!(d.table().slot_values(), vec!["", ""]);
        assert_eq!(d.cursor().cursor_offset(), 3);
    }

    #[test]
    fn test_commit_key_dispatches_and_resets_cursor() {
        let mut d = dispatcher(SelectionRange::caret(3), 2, "abc\ndef");

        let outcome = d.on_key(ENTER_KEY_CODE);
        assert!(outcome.is_consumed());
        assert_eq!(d.buffer(), "def");
        assert_eq!(d.table().slot_values(), vec!["abc", ""]);
        assert_eq!(d.cursor().cursor_offset(), 0);
    }

    #[test]
    fn test_custom_commit_key() {
        let table = SlotTable::from_values([""]);
        let settings = DispatchSettings { commit_key: 9 };
        let mut d = LineDispatcher::new(table, SelectionRange::caret(1), settings).with_buffer("a\nb");

        assert_eq!(d.on_key(ENTER_KEY_CODE), KeyOutcome::Ignored);
        assert!(d.on_key(9).is_consumed());
        assert_eq!(d.table().slot_values(), vec!["a"]);
    }

    #[test]
    fn test_legacy_cursor_offset_is_used() {
        let cursor = LegacySelection {
            through_selection: 3,
            selected: 0,
        };
        let mut d = dispatcher(cursor, 1, "abc\ndef");
        d.on_key(ENTER_KEY_CODE);

        assert_eq!(d.table().slot_values(), vec!["abc"]);
        assert_eq!(d.cursor().cursor_offset(), 0);
    }

    #[test]
    fn test_unsupported_cursor_takes_nothing() {
        let mut d = dispatcher(NoSelection, 2, "abc\ndef");
        d.on_key(ENTER_KEY_CODE);

        assert_eq!(d.table().slot_values(), vec!["", ""]);
        assert_eq!(d.buffer(), "abc\ndef");
    }

    #[test]
    fn test_reparse_leaves_unbroken_buffer_alone() {
        let mut d = dispatcher(SelectionRange::caret(5), 1, "onlyoneline");
        let result = d.reparse();

        assert!(!result.buffer_changed);
        assert_eq!(d.buffer(), "onlyoneline");
        // cursor untouched when the buffer did not change
        assert_eq!(d.cursor().cursor_offset(), 5);
        assert_eq!(d.table().slot_values(), vec![""]);
    }

    #[test]
    fn test_repeated_reparse_drains_one_line_per_call() {
        let mut d = dispatcher(NoSelection, 5, "one\ntwo\nthree\nfour");

        d.reparse();
        assert_eq!(d.table().filled_count(), 1);
        d.reparse();
        assert_eq!(d.table().filled_count(), 2);
        d.reparse();
        assert_eq!(d.table().slot_values(), vec!["one", "two", "three", "", ""]);
        assert_eq!(d.buffer(), "four");

        // no line break left
        d.reparse();
        assert_eq!(d.table().filled_count(), 3);
    }

    #[test]
    fn test_drain_cursor_variant() {
        let mut d = dispatcher(NoSelection, 5, "  alpha \n\n beta\ngamma");
        let report = d.drain(Variant::Cursor);

        assert_eq!(
            report.filled,
            vec![
                (0, "alpha".to_string()),
                (1, "beta".to_string()),
                (2, "gamma".to_string())
            ]
        );
        assert_eq!(report.stopped, DrainStop::Exhausted);
        assert_eq!(report.remaining, "");
    }

    #[test]
    fn test_drain_first_line_variant_stops_at_last_line() {
        let mut d = dispatcher(NoSelection, 5, "alpha\nbeta\ngamma");
        let report = d.drain(Variant::FirstLine);

        assert_eq!(report.filled.len(), 2);
        assert_eq!(report.remaining, "gamma");
        assert_eq!(report.stopped, DrainStop::NoLineBreak);
    }

    #[test]
    fn test_drain_stops_when_slots_full() {
        let mut d = dispatcher(NoSelection, 2, "a\nb\nc\nd");
        let report = d.drain(Variant::Cursor);

        assert_eq!(report.filled.len(), 2);
        assert_eq!(report.stopped, DrainStop::SlotsFull);
        assert_eq!(report.remaining, "c\nd");
    }
}
