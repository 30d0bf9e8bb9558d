//! Raw input tokens and their mapping onto actions.

mod error;
mod keymap;

pub use error::KeyMapError;
pub use keymap::{KeyMap, KeyMapBuilder};

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// A single raw input token.
///
/// Frontends translate their native events into keys; the core only ever
/// compares them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    /// Any other frontend-specific key, such as `"f5"` or `"kp-7"`.
    Named(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Enter => f.write_str("enter"),
            Key::Escape => f.write_str("escape"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for Key {
    type Err = KeyMapError;

    /// Single characters are taken verbatim; longer names are matched
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(KeyMapError::InvalidKey(s.to_owned())),
            (Some(c), None) => Ok(Key::Char(c)),
            _ => {
                let name = s.trim().to_ascii_lowercase();
                Ok(match name.as_str() {
                    "enter" | "return" => Key::Enter,
                    "escape" | "esc" => Key::Escape,
                    "up" => Key::Up,
                    "down" => Key::Down,
                    "left" => Key::Left,
                    "right" => Key::Right,
                    "space" => Key::Char(' '),
                    "" => return Err(KeyMapError::InvalidKey(s.to_owned())),
                    _ => Key::Named(name),
                })
            }
        }
    }
}

impl TryFrom<String> for Key {
    type Error = KeyMapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key::Char(c)
    }
}

/// Blocking source of input tokens.
///
/// `None` means the source is exhausted; the player state machine treats that
/// as a request to quit.
pub trait InputSource: Send {
    fn next_key(&mut self) -> Option<Key>;
}

/// Input source replaying a fixed sequence of keys.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    keys: VecDeque<Key>,
}

impl ScriptedInput {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn push(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    /// Keys not consumed yet.
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl FromIterator<Key> for ScriptedInput {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl InputSource for ScriptedInput {
    fn next_key(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }
}
