use std::collections::BTreeSet;

use crate::archetype::{analyze_typing_pattern, Reading, Thresholds};
use crate::capture::{CaptureState, SubPhase, DEFAULT_SENTENCE};
use crate::keystroke::{Key, TypoRecord};
use crate::metrics::MetricsSnapshot;
use crate::reveal::{RevealSignal, RevealState, DEFAULT_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Reveal,
    Typing,
    Reading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub message: String,
    pub sentence: String,
    pub thresholds: Thresholds,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            sentence: DEFAULT_SENTENCE.to_string(),
            thresholds: Thresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Key(Key),
    Advance,
    Submit,
    Reset,
}

/// All state for one run through reveal, typing and reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    config: SessionConfig,
    phase: Phase,
    reveal: RevealState,
    capture: CaptureState,
    reading: Option<Reading>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// Read-only projection of a session for rendering.
#[derive(Debug, PartialEq)]
pub enum SessionView<'a> {
    Reveal {
        message: &'a str,
        revealed: &'a BTreeSet<char>,
        typos: &'a [TypoRecord],
        complete: bool,
    },
    Typing {
        sub_phase: SubPhase,
        target: &'a str,
        scripted_text: &'a str,
        free_text: &'a str,
        word_count: usize,
        can_advance: bool,
        can_submit: bool,
    },
    Reading(&'a Reading),
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            phase: Phase::Reveal,
            reveal: RevealState::new(&config.message),
            capture: CaptureState::new(&config.sentence),
            reading: None,
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn reveal(&self) -> &RevealState {
        &self.reveal
    }

    pub fn capture(&self) -> &CaptureState {
        &self.capture
    }

    pub fn reading(&self) -> Option<&Reading> {
        self.reading.as_ref()
    }

    pub fn reset(self) -> Self {
        tracing::info!(from = %self.phase, "session reset");
        Self::new(self.config)
    }

    pub fn apply(self, event: SessionEvent, now: u64) -> Self {
        match (self.phase, event) {
            (_, SessionEvent::Reset) => self.reset(),
            (Phase::Reveal, SessionEvent::Key(key)) => self.reveal_key(key, now),
            (Phase::Reveal, SessionEvent::Advance) if self.reveal.is_complete() => {
                self.enter(Phase::Typing)
            }
            (Phase::Typing, SessionEvent::Key(key)) => Self {
                capture: self.capture.on_key(key, now),
                ..self
            },
            (Phase::Typing, SessionEvent::Advance) => self.advance_capture(now),
            (Phase::Typing, SessionEvent::Submit) => self.submit(now),
            _ => self,
        }
    }

    fn enter(mut self, phase: Phase) -> Self {
        tracing::info!(from = %self.phase, to = %phase, "phase changed");
        self.phase = phase;
        self
    }

    fn reveal_key(mut self, key: Key, now: u64) -> Self {
        let (reveal, signal) = self.reveal.on_key(key, now);
        self.reveal = reveal;
        match signal {
            RevealSignal::Skip => {
                tracing::info!("reveal skipped");
                self.enter(Phase::Typing)
            }
            RevealSignal::Continue => self,
        }
    }

    fn advance_capture(mut self, now: u64) -> Self {
        if self.capture.can_advance() {
            self.capture = self.capture.advance(now);
            tracing::info!(sub_phase = %self.capture.sub_phase, "sub-phase changed");
        }
        self
    }

    fn submit(mut self, now: u64) -> Self {
        let Some(submission) = self.capture.submit(now) else {
            return self;
        };
        tracing::info!(
            keystrokes = submission.keystrokes.len(),
            words = submission.metrics.word_count.unwrap_or(0),
            "typing submitted"
        );

        self.reading = analyze_typing_pattern(
            Some(&submission.metrics),
            &submission.keystrokes,
            &submission.misspelled_words,
            &self.config.thresholds,
        );
        match self.reading {
            Some(_) => self.enter(Phase::Reading),
            None => self,
        }
    }

    /// Live metrics for the current phase. The reading phase keeps showing
    /// the final typing metrics.
    pub fn metrics(&self, now: u64) -> MetricsSnapshot {
        match self.phase {
            Phase::Reveal => self.reveal.metrics(now),
            Phase::Typing | Phase::Reading => self.capture.metrics(now),
        }
    }

    pub fn view(&self) -> SessionView<'_> {
        match (self.phase, &self.reading) {
            (Phase::Reading, Some(reading)) => SessionView::Reading(reading),
            (Phase::Reveal, _) => SessionView::Reveal {
                message: self.reveal.message(),
                revealed: self.reveal.revealed(),
                typos: &self.reveal.typos,
                complete: self.reveal.is_complete(),
            },
            _ => SessionView::Typing {
                sub_phase: self.capture.sub_phase,
                target: self.capture.target(),
                scripted_text: &self.capture.scripted_text,
                free_text: &self.capture.free_text,
                word_count: self.capture.word_count(),
                can_advance: self.capture.can_advance(),
                can_submit: self.capture.can_submit(),
            },
        }
    }
}
