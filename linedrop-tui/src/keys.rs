use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use linedrop_core::LinedropError;

/// Key code a key event would carry in a browser-style key event.
///
/// Enter is 13, letters map to their upper-case ASCII code, digits to their
/// ASCII code, F1 is 112. Punctuation has no code: browser codes for it overlap
/// with named keys (`.` and Delete are both 46).
pub fn key_code(key: &KeyEvent) -> Option<u32> {
    match key.code {
        KeyCode::Enter => Some(13),
        KeyCode::Tab => Some(9),
        KeyCode::Backspace => Some(8),
        KeyCode::Esc => Some(27),
        KeyCode::Delete => Some(46),
        KeyCode::F(n) => Some(111 + u32::from(n)),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase() as u32),
        KeyCode::Char(c) if c.is_ascii_digit() => Some(c as u32),
        _ => None,
    }
}

/// A key binding from the config file, e.g. `ctrl-r`, `f5`, `alt-enter`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        code == self.code && key.modifiers.contains(self.modifiers)
    }
}

impl FromStr for KeySpec {
    type Err = LinedropError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let lowered = spec.trim().to_ascii_lowercase();
        let mut parts: Vec<&str> = lowered.split('-').collect();
        let key = parts
            .pop()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| LinedropError::invalid_key(spec, "missing key after modifier"))?;

        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            modifiers |= match part {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "meta" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                other => {
                    return Err(LinedropError::invalid_key(
                        spec,
                        format!("unknown modifier '{}'", other),
                    ))
                }
            };
        }

        let code = match key {
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            f if f.len() > 1 && f.starts_with('f') => {
                let n = f[1..]
                    .parse::<u8>()
                    .map_err(|_| LinedropError::invalid_key(spec, "unknown key"))?;
                KeyCode::F(n)
            }
            single if single.chars().count() == 1 => {
                KeyCode::Char(single.chars().next().unwrap_or(' '))
            }
            _ => return Err(LinedropError::invalid_key(spec, "unknown key")),
        };

        Ok(Self { code, modifiers })
    }
}

impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("Ctrl-")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("Alt-")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("Shift-")?;
        }
        match self.code {
            KeyCode::Enter => f.write_str("Enter"),
            KeyCode::Tab => f.write_str("Tab"),
            KeyCode::Esc => f.write_str("Esc"),
            KeyCode::F(n) => write!(f, "F{}", n),
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{}", c),
            _ => f.write_str("?"),
        }
    }
}
