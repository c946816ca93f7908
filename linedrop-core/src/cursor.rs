//! Cursor position reporting.
//!
//! Hosts report the cursor of the paste box in one of two ways: a direct
//! selection range, or a legacy selection object that only knows the text it
//! covers. The strategy is detected once at startup via [`HostCapabilities`]
//! and then used for every dispatch; hosts with neither report offset 0.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which reporting strategy a provider implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorKind {
    /// Direct selection range (start/end offsets)
    Range,
    /// Legacy selection: text through the selection end minus selected text
    Legacy,
    /// No cursor reporting at all
    Unsupported,
}

impl CursorKind {
    /// Pick the strategy for a host: range first, then legacy, then none
    pub fn detect(caps: HostCapabilities) -> Self {
        if caps.selection_range {
            CursorKind::Range
        } else if caps.legacy_selection {
            CursorKind::Legacy
        } else {
            CursorKind::Unsupported
        }
    }
}

impl fmt::Display for CursorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CursorKind::Range => "range",
            CursorKind::Legacy => "legacy",
            CursorKind::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// What the host can report about its text cursor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    pub selection_range: bool,
    pub legacy_selection: bool,
}

/// Capability seam between the dispatcher and the host's text cursor
pub trait CursorProvider {
    /// Character offset of the cursor in the paste box
    fn cursor_offset(&self) -> usize;

    /// Move the cursor (and collapse any selection) to offset 0
    fn reset_to_start(&mut self);

    fn kind(&self) -> CursorKind;
}

/// Range-based reporting: the offset is the selection start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    /// Collapsed selection (plain cursor) at `offset`
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }
}

impl CursorProvider for SelectionRange {
    fn cursor_offset(&self) -> usize {
        self.start.min(self.end)
    }

    fn reset_to_start(&mut self) {
        self.start = 0;
        self.end = 0;
    }

    fn kind(&self) -> CursorKind {
        CursorKind::Range
    }
}

/// Legacy reporting.
///
/// The host only exposes the length of the text from the buffer start through
/// the end of the selection, and the length of the selected text itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegacySelection {
    pub through_selection: usize,
    pub selected: usize,
}

impl CursorProvider for LegacySelection {
    fn cursor_offset(&self) -> usize {
        self.through_selection.saturating_sub(self.selected)
    }

    fn reset_to_start(&mut self) {
        self.through_selection = 0;
        self.selected = 0;
    }

    fn kind(&self) -> CursorKind {
        CursorKind::Legacy
    }
}

/// Host without any cursor reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSelection;

impl CursorProvider for NoSelection {
    fn cursor_offset(&self) -> usize {
        0
    }

    fn reset_to_start(&mut self) {}

    fn kind(&self) -> CursorKind {
        CursorKind::Unsupported
    }
}

impl<C: CursorProvider + ?Sized> CursorProvider for Box<C> {
    fn cursor_offset(&self) -> usize {
        (**self).cursor_offset()
    }

    fn reset_to_start(&mut self) {
        (**self).reset_to_start()
    }

    fn kind(&self) -> CursorKind {
        (**self).kind()
    }
}
