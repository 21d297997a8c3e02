use serde::Serialize;

use crate::keystroke::{Key, Keystroke};
use crate::quality::TypingQuality;
use crate::util::{mean, percent, round1, std_dev};

const CHARS_PER_WORD: f64 = 5.0;
const MS_PER_MINUTE: f64 = 60_000.0;
const SCRIPTED_WEIGHT: f64 = 0.6;
const FREE_WEIGHT: f64 = 0.4;
const LENGTH_MISMATCH_PENALTY: f64 = 2.0;

/// Display-ready metrics. Values are already rounded: WPM and rhythm to whole
/// numbers, percentages to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub wpm: f64,
    pub accuracy: f64,
    pub average_rhythm: f64,
    /// population standard deviation of inter-key intervals, in ms
    pub rhythm_variance: f64,
    pub total_keystrokes: usize,
    pub total_typos: usize,
    pub typo_rate: f64,
    pub is_spam: bool,
    pub corrections: usize,
    pub progress: Option<f64>,
    pub word_count: Option<usize>,
    pub scripted_accuracy: Option<f64>,
    pub free_accuracy: Option<f64>,
}

impl MetricsSnapshot {
    pub fn zeroed() -> Self {
        Self {
            wpm: 0.0,
            accuracy: 100.0,
            average_rhythm: 0.0,
            rhythm_variance: 0.0,
            total_keystrokes: 0,
            total_typos: 0,
            typo_rate: 0.0,
            is_spam: false,
            corrections: 0,
            progress: None,
            word_count: None,
            scripted_accuracy: None,
            free_accuracy: None,
        }
    }
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rhythm {
    pub average: f64,
    pub deviation: f64,
}

/// Mean and population standard deviation of the positive intervals. The zero
/// interval of a run's first keystroke is left out.
pub fn rhythm<'a>(keystrokes: impl IntoIterator<Item = &'a Keystroke>) -> Rhythm {
    let intervals: Vec<f64> = keystrokes
        .into_iter()
        .filter(|k| k.time_since_last > 0)
        .map(|k| k.time_since_last as f64)
        .collect();

    Rhythm {
        average: mean(&intervals).unwrap_or(0.0),
        deviation: std_dev(&intervals).unwrap_or(0.0),
    }
}

pub fn words_per_minute(counted_keystrokes: usize, elapsed_ms: u64) -> f64 {
    if elapsed_ms == 0 {
        return 0.0;
    }
    (counted_keystrokes as f64 / CHARS_PER_WORD) / (elapsed_ms as f64 / MS_PER_MINUTE)
}

fn counts_toward_speed(k: &Keystroke) -> bool {
    !k.key.is_backspace() && !k.is_typo
}

/// Character-by-character accuracy against the scripted sentence, with a
/// penalty for typing too much or too little.
pub fn scripted_accuracy(typed: &str, target: &str) -> f64 {
    let typed: Vec<char> = typed.chars().collect();
    let target: Vec<char> = target.chars().collect();
    if typed.is_empty() {
        return 100.0;
    }

    let correct = typed.iter().zip(&target).filter(|(a, b)| a == b).count();
    let length_diff = typed.len().abs_diff(target.len());
    let accuracy = percent(correct, typed.len().max(target.len()));

    (accuracy - length_diff as f64 * LENGTH_MISMATCH_PENALTY).max(0.0)
}

/// Positions within the target where the typed character differs.
pub fn scripted_mismatches(typed: &str, target: &str) -> usize {
    typed
        .chars()
        .zip(target.chars())
        .filter(|(a, b)| a != b)
        .count()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Inputs for the reveal screen's live metrics.
#[derive(Debug, Clone, Copy)]
pub struct RevealInputs<'a> {
    pub keystrokes: &'a [Keystroke],
    pub typo_count: usize,
    pub revealed_count: usize,
    pub message_len: usize,
    pub started_at: Option<u64>,
    pub now: u64,
}

pub fn reveal_metrics(input: &RevealInputs) -> MetricsSnapshot {
    let keystrokes = input.keystrokes;
    if keystrokes.is_empty() {
        return MetricsSnapshot {
            total_typos: input.typo_count,
            progress: Some(0.0),
            ..MetricsSnapshot::zeroed()
        };
    }

    let total = keystrokes.len();
    let backspaces = keystrokes.iter().filter(|k| k.key == Key::Backspace).count();
    let counted = keystrokes.iter().filter(|k| counts_toward_speed(k)).count();
    let elapsed = input
        .started_at
        .map_or(0, |start| input.now.saturating_sub(start));
    let rhythm = rhythm(keystrokes);

    let accurate = total.saturating_sub(input.typo_count + backspaces);

    MetricsSnapshot {
        wpm: words_per_minute(counted, elapsed).round(),
        accuracy: round1(percent(accurate, total)),
        average_rhythm: rhythm.average.round(),
        rhythm_variance: rhythm.deviation.round(),
        total_keystrokes: total,
        total_typos: input.typo_count,
        typo_rate: round1(percent(input.typo_count, total)),
        progress: Some(round1(percent(input.revealed_count, input.message_len))),
        ..MetricsSnapshot::zeroed()
    }
}

/// Inputs for the scripted + free typing metrics.
#[derive(Debug, Clone, Copy)]
pub struct CaptureInputs<'a> {
    pub scripted_keystrokes: &'a [Keystroke],
    pub free_keystrokes: &'a [Keystroke],
    pub scripted_text: &'a str,
    pub target_sentence: &'a str,
    pub free_text: &'a str,
    /// `None` while still on the scripted sentence
    pub free_quality: Option<&'a TypingQuality>,
    pub started_at: Option<u64>,
    pub now: u64,
}

/// Computed from scratch on every call, so identical inputs give identical
/// snapshots.
pub fn capture_metrics(input: &CaptureInputs) -> MetricsSnapshot {
    let all: Vec<&Keystroke> = input
        .scripted_keystrokes
        .iter()
        .chain(input.free_keystrokes)
        .collect();
    if all.is_empty() {
        return MetricsSnapshot::zeroed();
    }

    let counted = all.iter().filter(|k| counts_toward_speed(k)).count();
    let elapsed = input
        .started_at
        .map_or(0, |start| input.now.saturating_sub(start));
    let rhythm = rhythm(all.iter().copied());

    let scripted = scripted_accuracy(input.scripted_text, input.target_sentence);
    let scripted_typos = scripted_mismatches(input.scripted_text, input.target_sentence);
    let scripted_len = input.scripted_text.chars().count();
    let free_words = word_count(input.free_text);

    let (accuracy, typo_rate, free_accuracy, total_typos, is_spam, corrections) =
        match input.free_quality {
            None => (
                scripted,
                percent(scripted_typos, scripted_len.max(1)),
                None,
                scripted_typos,
                false,
                0,
            ),
            Some(quality) => {
                let typos = scripted_typos + quality.typos.typo_count;
                (
                    scripted * SCRIPTED_WEIGHT + quality.accuracy * FREE_WEIGHT,
                    percent(typos, (scripted_len + free_words).max(1)),
                    Some(round1(quality.accuracy)),
                    typos,
                    quality.is_spam,
                    quality.corrections.corrections,
                )
            }
        };

    MetricsSnapshot {
        wpm: words_per_minute(counted, elapsed).round(),
        accuracy: round1(accuracy),
        average_rhythm: rhythm.average.round(),
        rhythm_variance: rhythm.deviation.round(),
        total_keystrokes: all.len(),
        total_typos,
        typo_rate: round1(typo_rate),
        is_spam,
        corrections,
        progress: None,
        word_count: Some(free_words),
        scripted_accuracy: Some(round1(scripted)),
        free_accuracy,
    }
}
