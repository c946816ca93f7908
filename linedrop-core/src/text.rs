//! Line-level text helpers shared by both dispatch variants.
//!
//! Offsets handed in by cursor providers are character offsets, never byte
//! offsets, so every slicing helper here converts through `char_indices`.

use once_cell::sync::Lazy;
use regex::Regex;

/// First line of the buffer: everything up to and including one line break.
static FIRST_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A([^\r\n]*)(?:\r\n|\n|\r)").expect("first line regex"));

/// Run of whitespace-only lines at the start of the buffer, including a
/// whitespace-only final segment that has no line break.
static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A(?:[^\S\r\n]*(?:\r\n|\n|\r))*(?:[^\S\r\n]*\z)?").expect("blank lines regex")
});

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the character at `offset`, clamped to the end of `text`.
pub fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Split `text` at a character offset. Offsets past the end clamp.
pub fn split_at_char(text: &str, offset: usize) -> (&str, &str) {
    text.split_at(byte_index(text, offset))
}

/// Trim leading and trailing whitespace of every line and drop blank lines.
///
/// Surviving lines are joined with `\n`, so `"  a \r\n\n b"` becomes `"a\nb"`.
pub fn trim_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip leading whitespace, reporting whether anything was removed.
pub fn strip_leading_whitespace(text: &str) -> (&str, bool) {
    let stripped = text.trim_start();
    (stripped, stripped.len() != text.len())
}

/// Split off the first line of `text` if it is terminated by a line break.
///
/// Returns the line without its break and the remainder with any directly
/// following whitespace-only lines removed. `None` when `text` has no line
/// break at all.
pub fn split_first_line(text: &str) -> Option<(&str, &str)> {
    let captures = FIRST_LINE_RE.captures(text)?;
    let whole = captures.get(0)?;
    let line = captures.get(1).map(|m| m.as_str()).unwrap_or("");

    let rest = &text[whole.end()..];
    let blank = BLANK_LINES_RE.find(rest).map(|m| m.end()).unwrap_or(0);

    Some((line, &rest[blank..]))
}

/// Character offset of the end of the first line (before its line break).
pub fn first_line_end(text: &str) -> usize {
    text.chars().take_while(|c| *c != '\n' && *c != '\r').count()
}

/// Value sanitization of a single-line field: line breaks are dropped.
pub fn sanitize_single_line(value: &str) -> String {
    value.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}
