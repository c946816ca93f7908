//! Pure line dispatch.
//!
//! Both variants take the paste-box content and the slot values and return a
//! [`Dispatch`] describing what the host should write back. Nothing here
//! touches a widget; hosts apply the result themselves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LinedropError;
use crate::slots::first_empty;
use crate::text::{split_at_char, split_first_line, strip_leading_whitespace, trim_lines};

/// How the line to dispatch is found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Split at the cursor: text before it is the line, the rest stays
    #[default]
    Cursor,
    /// Take the first line of the buffer regardless of the cursor
    FirstLine,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Cursor => f.write_str("cursor"),
            Variant::FirstLine => f.write_str("first-line"),
        }
    }
}

impl FromStr for Variant {
    type Err = LinedropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cursor" => Ok(Variant::Cursor),
            "first-line" | "first_line" => Ok(Variant::FirstLine),
            other => Err(LinedropError::config(format!(
                "unknown dispatch variant '{}' (expected cursor or first-line)",
                other
            ))),
        }
    }
}

/// Outcome of one dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispatch {
    /// Line taken from the buffer, if any
    pub line: Option<String>,

    /// Buffer content after the line was removed
    pub updated_buffer: String,

    /// Whether the host must write `updated_buffer` back and reset its cursor
    pub buffer_changed: bool,

    /// Slot that received `line` (index in slot order)
    pub updated_slot_index: Option<usize>,
}

impl Dispatch {
    fn unchanged(buffer: &str) -> Self {
        Self {
            line: None,
            updated_buffer: buffer.to_string(),
            buffer_changed: false,
            updated_slot_index: None,
        }
    }

    /// A line was taken but every slot was already filled
    pub fn dropped_line(&self) -> bool {
        self.line.is_some() && self.updated_slot_index.is_none()
    }
}

/// Split the buffer at `offset` and send the text before it to the first empty slot.
///
/// The buffer is always rewritten to the trimmed remainder, even when no slot
/// was free; in that case the line is discarded.
pub fn dispatch_at_cursor(buffer: &str, offset: usize, slots: &[String]) -> Dispatch {
    let (before, after) = split_at_char(buffer, offset);
    let line = trim_lines(before);
    let rest = trim_lines(after);

    Dispatch {
        line: Some(line),
        updated_buffer: rest,
        buffer_changed: true,
        updated_slot_index: first_empty(slots),
    }
}

/// Strip leading blank lines and send the first line of the buffer to the first empty slot.
///
/// A buffer without a line break yields no line; the buffer is only marked
/// changed if leading whitespace was stripped.
pub fn dispatch_first_line(buffer: &str, slots: &[String]) -> Dispatch {
    let (stripped, had_leading) = strip_leading_whitespace(buffer);

    match split_first_line(stripped) {
        Some((line, rest)) => Dispatch {
            line: Some(line.to_string()),
            updated_buffer: rest.to_string(),
            buffer_changed: true,
            updated_slot_index: first_empty(slots),
        },
        None if had_leading => Dispatch {
            updated_buffer: stripped.to_string(),
            buffer_changed: true,
            ..Dispatch::unchanged(buffer)
        },
        None => Dispatch::unchanged(buffer),
    }
}

/// Run the given variant once
pub fn dispatch(variant: Variant, buffer: &str, offset: usize, slots: &[String]) -> Dispatch {
    match variant {
        Variant::Cursor => dispatch_at_cursor(buffer, offset, slots),
        Variant::FirstLine => dispatch_first_line(buffer, slots),
    }
}
