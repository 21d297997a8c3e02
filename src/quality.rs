use itertools::Itertools;
use serde::Serialize;

use crate::dictionary::Dictionary;
use crate::keystroke::{Key, Keystroke};
use crate::util::{percent, round1};

const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '\'', '"', '(', ')', '[', ']', '{', '}',
];

const KEYBOARD_WALKS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "qwertyuiop", "asdfghjkl"];

const SPAM_WINDOW: usize = 20;
const WALK_WINDOW: usize = 10;
const PERIOD_WINDOW: usize = 8;
const FAST_REPEAT_MS: u64 = 50;
const SPAM_THRESHOLD: u32 = 30;

const CORRECTION_PENALTY: f64 = 2.0;
const MAX_CORRECTION_PENALTY: f64 = 20.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypoReport {
    pub total_words: usize,
    /// tokens as typed, punctuation included
    pub misspelled_words: Vec<String>,
    pub typo_count: usize,
    pub typo_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Corrections {
    pub corrections: usize,
    pub correction_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypingQuality {
    pub typos: TypoReport,
    pub corrections: Corrections,
    pub accuracy: f64,
    pub is_spam: bool,
}

impl Default for TypingQuality {
    fn default() -> Self {
        Self {
            typos: TypoReport::default(),
            corrections: Corrections::default(),
            accuracy: 100.0,
            is_spam: false,
        }
    }
}

fn strip_punctuation(word: &str) -> String {
    word.chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect()
}

fn is_exempt(cleaned: &str) -> bool {
    cleaned.chars().count() <= 1 || cleaned.chars().all(|c| c.is_ascii_digit())
}

pub fn detect_typos(text: &str) -> TypoReport {
    detect_typos_with(Dictionary::english(), text)
}

pub fn detect_typos_with(dictionary: &Dictionary, text: &str) -> TypoReport {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| !strip_punctuation(w).is_empty())
        .collect();

    if words.is_empty() {
        return TypoReport::default();
    }

    let misspelled_words: Vec<String> = words
        .iter()
        .filter(|w| {
            let cleaned = strip_punctuation(w).to_lowercase();
            !is_exempt(&cleaned) && !dictionary.is_valid_word(&cleaned)
        })
        .map(|w| w.to_string())
        .collect();

    TypoReport {
        total_words: words.len(),
        typo_count: misspelled_words.len(),
        typo_rate: round1(percent(misspelled_words.len(), words.len())),
        misspelled_words,
    }
}

/// Scores the tail of a keystroke log for signs of keyboard mashing.
pub fn spam_score(keystrokes: &[Keystroke]) -> u32 {
    if keystrokes.len() < 3 {
        return 0;
    }

    let start = keystrokes.len().saturating_sub(SPAM_WINDOW);
    let recent: Vec<(char, u64)> = keystrokes[start..]
        .iter()
        .filter_map(|k| k.key.lowercase().map(|c| (c, k.time_since_last)))
        .collect();

    let mut score = 0;

    let mut run = 0;
    let mut longest_run = 0;
    for (prev, cur) in recent.iter().tuple_windows() {
        if prev.0 == cur.0 {
            run += 1;
            longest_run = longest_run.max(run);
        } else {
            run = 0;
        }
    }
    // three equal pairs in a row means four identical keys
    if longest_run >= 3 {
        score += 50;
    }

    let fast_repeats = recent
        .iter()
        .tuple_windows()
        .filter(|(prev, cur)| prev.0 == cur.0 && cur.1 < FAST_REPEAT_MS)
        .count();
    if fast_repeats >= 3 {
        score += 30;
    }

    if recent.len() >= PERIOD_WINDOW {
        let tail: Vec<char> = recent[recent.len() - PERIOD_WINDOW..]
            .iter()
            .map(|(c, _)| *c)
            .collect();
        let (first, second) = tail.split_at(PERIOD_WINDOW / 2);
        if first == second {
            score += 20;
        }
    }

    let recent_text: String = recent[recent.len().saturating_sub(WALK_WINDOW)..]
        .iter()
        .map(|(c, _)| *c)
        .collect();
    let walks = KEYBOARD_WALKS
        .iter()
        .filter(|walk| recent_text.contains(**walk))
        .count() as u32;
    score += 25 * walks;

    score
}

pub fn detect_spam_pattern(keystrokes: &[Keystroke]) -> bool {
    spam_score(keystrokes) >= SPAM_THRESHOLD
}

/// Counts runs of backspaces that are followed by a retyped character.
pub fn detect_corrections(keystrokes: &[Keystroke]) -> Corrections {
    let mut result = Corrections::default();
    let mut pending_backspaces = 0;

    for k in keystrokes {
        match k.key {
            Key::Backspace => pending_backspaces += 1,
            Key::Char(_) => {
                if pending_backspaces > 0 {
                    result.corrections += 1;
                    result.correction_chars += pending_backspaces;
                }
                pending_backspaces = 0;
            }
        }
    }

    result
}

pub fn analyze_typing_quality(text: &str, keystrokes: &[Keystroke]) -> TypingQuality {
    let typos = detect_typos(text);
    let corrections = detect_corrections(keystrokes);
    let is_spam = detect_spam_pattern(keystrokes);

    let penalty = (corrections.corrections as f64 * CORRECTION_PENALTY).min(MAX_CORRECTION_PENALTY);
    let accuracy = ((100.0 - typos.typo_rate) - penalty).max(0.0);

    TypingQuality {
        typos,
        corrections,
        accuracy: round1(accuracy),
        is_spam,
    }
}
