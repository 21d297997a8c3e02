use std::collections::BTreeSet;

use crate::keystroke::{Key, Keystroke, TypoRecord};
use crate::metrics::{reveal_metrics, MetricsSnapshot, RevealInputs};

pub const DEFAULT_MESSAGE: &str = "What story does your typing tell? Unlike handwriting, typing is sterile, uniform and common. But with typing data, we can learn a lot about you! Press Enter to get your Typing Tarot reading.";

pub const SKIP_WORD: &str = "skip";

/// Characters that are always shown, revealed or not.
pub const ALWAYS_SHOWN: &str = ".,!?;:'";

/// Whether a message character is visible given the revealed letters.
pub fn is_shown(c: char, revealed: &BTreeSet<char>) -> bool {
    c == ' ' || ALWAYS_SHOWN.contains(c) || revealed.contains(&c.to_ascii_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum RevealStatus {
    Inactive,
    Active,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealSignal {
    Continue,
    /// the skip word was typed, leave the reveal phase now
    Skip,
}

/// The hidden message, uncovered letter by letter as the user types.
/// Typing `skip` jumps straight to the typing phase.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealState {
    message: String,
    lowered: String,
    letters: BTreeSet<char>,
    revealed: BTreeSet<char>,
    history: Vec<char>,
    skip_buffer: String,
    pub typos: Vec<TypoRecord>,
    pub keystrokes: Vec<Keystroke>,
    pub started_at: Option<u64>,
}

impl Default for RevealState {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE)
    }
}

impl RevealState {
    pub fn new(message: &str) -> Self {
        let lowered = message.to_lowercase();
        let letters = lowered.chars().filter(char::is_ascii_lowercase).collect();

        Self {
            message: message.to_string(),
            lowered,
            letters,
            revealed: BTreeSet::new(),
            history: Vec::new(),
            skip_buffer: String::new(),
            typos: Vec::new(),
            keystrokes: Vec::new(),
            started_at: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn revealed(&self) -> &BTreeSet<char> {
        &self.revealed
    }

    pub fn status(&self) -> RevealStatus {
        if self.is_complete() {
            RevealStatus::Complete
        } else if self.started_at.is_some() {
            RevealStatus::Active
        } else {
            RevealStatus::Inactive
        }
    }

    /// Every distinct a-z letter of the message has been revealed.
    pub fn is_complete(&self) -> bool {
        !self.letters.is_empty() && self.letters.is_subset(&self.revealed)
    }

    pub fn is_shown(&self, c: char) -> bool {
        is_shown(c, &self.revealed)
    }

    /// Message characters currently visible, counting spaces and punctuation.
    pub fn revealed_count(&self) -> usize {
        self.message.chars().filter(|c| self.is_shown(*c)).count()
    }

    pub fn on_key(mut self, key: Key, now: u64) -> (Self, RevealSignal) {
        match key.lowercase() {
            Some(c) => {
                self.skip_buffer.push(c);
                let excess = self.skip_buffer.chars().count().saturating_sub(SKIP_WORD.len());
                if excess > 0 {
                    self.skip_buffer = self.skip_buffer.chars().skip(excess).collect();
                }
                if self.skip_buffer == SKIP_WORD {
                    self.skip_buffer.clear();
                    return (self, RevealSignal::Skip);
                }
            }
            None => {
                self.skip_buffer.pop();
            }
        }

        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        let previous = self.keystrokes.last().map(|k| k.timestamp);

        let is_typo = match key.lowercase() {
            None => {
                if let Some(last) = self.history.pop() {
                    self.revealed.remove(&last);
                }
                false
            }
            Some(c) if self.lowered.contains(c) => {
                self.revealed.insert(c);
                self.history.push(c);
                false
            }
            Some(c) => {
                self.typos.push(TypoRecord {
                    typed: c,
                    timestamp: now,
                });
                true
            }
        };
        self.keystrokes.push(Keystroke::new(key, now, previous, is_typo));

        (self, RevealSignal::Continue)
    }

    pub fn metrics(&self, now: u64) -> MetricsSnapshot {
        reveal_metrics(&RevealInputs {
            keystrokes: &self.keystrokes,
            typo_count: self.typos.len(),
            revealed_count: self.revealed_count(),
            message_len: self.message.chars().count(),
            started_at: self.started_at,
            now,
        })
    }
}
