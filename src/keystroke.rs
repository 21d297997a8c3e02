use serde::Serialize;

/// A normalized key action. Everything the core consumes is one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Key {
    Char(char),
    Backspace,
}

impl Key {
    pub fn is_backspace(&self) -> bool {
        matches!(self, Key::Backspace)
    }

    /// Lower-cased character, `None` for backspace.
    pub fn lowercase(&self) -> Option<char> {
        match self {
            Key::Char(c) => Some(c.to_lowercase().next().unwrap_or(*c)),
            Key::Backspace => None,
        }
    }
}

/// One recorded key action. Never edited once appended to a log.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Keystroke {
    pub key: Key,
    /// monotonic milliseconds
    pub timestamp: u64,
    pub time_since_last: u64,
    pub is_typo: bool,
}

impl Keystroke {
    pub fn new(key: Key, timestamp: u64, previous: Option<u64>, is_typo: bool) -> Self {
        Self {
            key,
            timestamp,
            time_since_last: previous.map_or(0, |p| timestamp.saturating_sub(p)),
            is_typo,
        }
    }
}

/// A character typed during the reveal that is not part of the hidden message.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TypoRecord {
    pub typed: char,
    pub timestamp: u64,
}
