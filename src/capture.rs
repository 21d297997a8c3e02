use serde::Serialize;

use crate::keystroke::{Key, Keystroke};
use crate::metrics::{capture_metrics, word_count, CaptureInputs, MetricsSnapshot};
use crate::quality::{analyze_typing_quality, TypingQuality};

pub const DEFAULT_SENTENCE: &str = "The quick brown fox jumps over the lazy dog.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum SubPhase {
    Scripted,
    Free,
}

/// Everything the classifier needs once the user submits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub scripted_text: String,
    pub free_text: String,
    /// scripted and free text joined by a single space
    pub text: String,
    pub metrics: MetricsSnapshot,
    pub keystrokes: Vec<Keystroke>,
    pub misspelled_words: Vec<String>,
}

/// A scripted sentence first, then a free-form passage.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureState {
    target: String,
    pub sub_phase: SubPhase,
    pub scripted_text: String,
    pub free_text: String,
    pub scripted_keystrokes: Vec<Keystroke>,
    pub free_keystrokes: Vec<Keystroke>,
    pub started_at: Option<u64>,
    pub free_started_at: Option<u64>,
    last_keystroke_at: Option<u64>,
}

impl Default for CaptureState {
    fn default() -> Self {
        Self::new(DEFAULT_SENTENCE)
    }
}

impl CaptureState {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            sub_phase: SubPhase::Scripted,
            scripted_text: String::new(),
            free_text: String::new(),
            scripted_keystrokes: Vec::new(),
            free_keystrokes: Vec::new(),
            started_at: None,
            free_started_at: None,
            last_keystroke_at: None,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.free_text)
    }

    pub fn scripted_matches(&self) -> bool {
        self.scripted_text == self.target
    }

    pub fn can_advance(&self) -> bool {
        self.sub_phase == SubPhase::Scripted && self.scripted_matches()
    }

    pub fn can_submit(&self) -> bool {
        self.sub_phase == SubPhase::Free
            && self.scripted_matches()
            && !self.free_text.trim().is_empty()
    }

    pub fn on_key(mut self, key: Key, now: u64) -> Self {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        let (buffer, log) = match self.sub_phase {
            SubPhase::Scripted => (&mut self.scripted_text, &mut self.scripted_keystrokes),
            SubPhase::Free => (&mut self.free_text, &mut self.free_keystrokes),
        };
        match key {
            Key::Char(c) => buffer.push(c),
            Key::Backspace => {
                buffer.pop();
            }
        }
        log.push(Keystroke::new(key, now, self.last_keystroke_at, false));
        self.last_keystroke_at = Some(now);

        self
    }

    /// Moves from the scripted sentence to free typing. A no-op unless the
    /// sentence was typed exactly.
    pub fn advance(mut self, now: u64) -> Self {
        if self.can_advance() {
            self.sub_phase = SubPhase::Free;
            self.free_text.clear();
            self.free_started_at = Some(now);
        }
        self
    }

    /// Quality of the free passage. An empty buffer counts as untouched,
    /// whatever was typed and erased before.
    fn free_quality(&self) -> Option<TypingQuality> {
        match self.sub_phase {
            SubPhase::Scripted => None,
            SubPhase::Free if self.free_text.is_empty() => Some(TypingQuality::default()),
            SubPhase::Free => Some(analyze_typing_quality(
                &self.free_text,
                &self.free_keystrokes,
            )),
        }
    }

    pub fn metrics(&self, now: u64) -> MetricsSnapshot {
        let quality = self.free_quality();
        capture_metrics(&CaptureInputs {
            scripted_keystrokes: &self.scripted_keystrokes,
            free_keystrokes: &self.free_keystrokes,
            scripted_text: &self.scripted_text,
            target_sentence: &self.target,
            free_text: &self.free_text,
            free_quality: quality.as_ref(),
            started_at: self.started_at,
            now,
        })
    }

    pub fn submit(&self, now: u64) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }

        let misspelled_words = self
            .free_quality()
            .map(|q| q.typos.misspelled_words)
            .unwrap_or_default();

        Some(Submission {
            scripted_text: self.scripted_text.clone(),
            free_text: self.free_text.clone(),
            text: format!("{} {}", self.scripted_text, self.free_text),
            metrics: self.metrics(now),
            keystrokes: self
                .scripted_keystrokes
                .iter()
                .chain(&self.free_keystrokes)
                .copied()
                .collect(),
            misspelled_words,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(mut state: CaptureState, text: &str, start: u64) -> CaptureState {
        for (i, c) in text.chars().enumerate() {
            state = state.on_key(Key::Char(c), start + i as u64 * 100);
        }
        state
    }

    fn scripted_done() -> CaptureState {
        type_text(CaptureState::default(), DEFAULT_SENTENCE, 0)
    }

    #[test]
    fn test_scripted_gate_exact() {
        let state = scripted_done();
        assert!(state.can_advance());

        let state = state.on_key(Key::Char(' '), 10_000);
        assert!(!state.can_advance());

        let state = state.on_key(Key::Backspace, 10_100);
        assert!(state.can_advance());
    }

    #[test]
    fn test_scripted_gate_rejects_partial_and_case() {
        let partial = type_text(CaptureState::default(), "The quick brown", 0);
        assert!(!partial.can_advance());

        let lower = type_text(CaptureState::default(), &DEFAULT_SENTENCE.to_lowercase(), 0);
        assert!(!lower.can_advance());
    }

    #[test]
    fn test_advance_requires_match() {
        let state = type_text(CaptureState::default(), "The", 0).advance(500);
        assert_eq!(state.sub_phase, SubPhase::Scripted);
        assert_eq!(state.free_started_at, None);

        let state = scripted_done().advance(9_000);
        assert_eq!(state.sub_phase, SubPhase::Free);
        assert_eq!(state.free_started_at, Some(9_000));
        assert!(!state.can_advance());
    }

    #[test]
    fn test_keystrokes_go_to_active_log() {
        let state = scripted_done().advance(9_000);
        let state = type_text(state, "hi", 10_000);

        assert_eq!(state.scripted_keystrokes.len(), DEFAULT_SENTENCE.len());
        assert_eq!(state.free_keystrokes.len(), 2);
        assert_eq!(state.free_text, "hi");
        assert_eq!(state.scripted_text, DEFAULT_SENTENCE);
    }

    #[test]
    fn test_interval_runs_across_sub_phases() {
        let state = scripted_done().advance(9_000);
        let last_scripted = state.scripted_keystrokes.last().unwrap().timestamp;

        let state = state.on_key(Key::Char('a'), last_scripted + 750);
        assert_eq!(state.free_keystrokes[0].time_since_last, 750);
        assert_eq!(state.started_at, Some(0));
    }

    #[test]
    fn test_backspace_edits_and_logs() {
        let state = type_text(CaptureState::default(), "Thx", 0)
            .on_key(Key::Backspace, 300)
            .on_key(Key::Char('e'), 400);

        assert_eq!(state.scripted_text, "The");
        assert_eq!(state.scripted_keystrokes.len(), 5);
        assert_eq!(state.scripted_keystrokes[3].key, Key::Backspace);
    }

    #[test]
    fn test_word_count() {
        let state = type_text(scripted_done().advance(9_000), "  one  two ", 10_000);
        assert_eq!(state.word_count(), 2);
    }

    #[test]
    fn test_submit_requires_free_text() {
        let state = scripted_done().advance(9_000);
        assert!(!state.can_submit());
        assert!(state.submit(10_000).is_none());

        let state = type_text(state, "   ", 10_000);
        assert!(!state.can_submit());
    }

    #[test]
    fn test_submit_not_allowed_while_scripted() {
        let state = scripted_done();
        assert!(!state.can_submit());
    }

    #[test]
    fn test_submission_payload() {
        let state = type_text(scripted_done().advance(9_000), "the river teh", 10_000);
        let submission = state.submit(12_000).unwrap();

        assert_eq!(
            submission.text,
            "The quick brown fox jumps over the lazy dog. the river teh"
        );
        assert_eq!(submission.free_text, "the river teh");
        assert_eq!(submission.keystrokes.len(), DEFAULT_SENTENCE.len() + 13);
        assert_eq!(submission.misspelled_words, vec!["teh".to_string()]);
        assert_eq!(submission.metrics.word_count, Some(3));
        assert_eq!(submission.metrics.scripted_accuracy, Some(100.0));
    }

    #[test]
    fn test_metrics_scripted_phase_has_no_free_accuracy() {
        let state = type_text(CaptureState::default(), "The", 0);
        let snap = state.metrics(1_000);
        assert_eq!(snap.free_accuracy, None);
        assert_eq!(snap.total_keystrokes, 3);
    }

    #[test]
    fn test_erased_free_text_keeps_full_accuracy() {
        let keys = [
            Key::Char('a'),
            Key::Char('b'),
            Key::Backspace,
            Key::Char('c'),
            Key::Backspace,
            Key::Backspace,
        ];
        let mut state = scripted_done().advance(5_000);
        for (i, key) in keys.into_iter().enumerate() {
            state = state.on_key(key, 5_100 + i as u64 * 150);
        }
        assert!(state.free_text.is_empty());

        let snap = state.metrics(7_000);
        assert_eq!(snap.free_accuracy, Some(100.0));
        assert_eq!(snap.accuracy, 100.0);
        assert_eq!(snap.corrections, 0);
        assert!(!snap.is_spam);
    }

    #[test]
    fn test_erased_mashing_is_not_spam() {
        let mut state = scripted_done().advance(5_000);
        for i in 0..4u64 {
            state = state.on_key(Key::Char('a'), 5_100 + i * 20);
        }
        for i in 0..4u64 {
            state = state.on_key(Key::Backspace, 5_300 + i * 100);
        }
        assert!(state.free_text.is_empty());

        let snap = state.metrics(6_000);
        assert!(!snap.is_spam);
        assert_eq!(snap.free_accuracy, Some(100.0));
    }

    #[test]
    fn test_free_quality_applies_once_text_remains() {
        let mut state = scripted_done().advance(5_000);
        for i in 0..4u64 {
            state = state.on_key(Key::Char('a'), 5_100 + i * 20);
        }

        assert!(state.metrics(6_000).is_spam);
    }
}
