use std::time::Instant;

use crate::config::Config;
use crate::input::{self, Action};
use crate::keystroke::Key;
use crate::metrics::MetricsSnapshot;
use crate::runtime::TarotEvent;
use crate::session::{Phase, Session, SessionConfig, SessionEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Quit,
}

/// Last key shown lit on the on-screen typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub key: Key,
    pub until: u64,
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub config: Config,
    pub highlight: Option<Highlight>,
    origin: Instant,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            session: Session::new(SessionConfig::from(&config)),
            config,
            highlight: None,
            origin: Instant::now(),
        }
    }

    /// Milliseconds since the app started.
    pub fn now(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.session.metrics(self.now())
    }

    pub fn highlighted_key(&self) -> Option<Key> {
        self.highlight.map(|h| h.key)
    }

    pub fn handle(&mut self, event: TarotEvent) -> AppControl {
        let now = self.now();
        self.handle_at(event, now)
    }

    pub fn handle_at(&mut self, event: TarotEvent, now: u64) -> AppControl {
        match event {
            TarotEvent::Tick => {
                if self.highlight.is_some_and(|h| now >= h.until) {
                    self.highlight = None;
                }
                AppControl::Continue
            }
            TarotEvent::Resize => AppControl::Continue,
            TarotEvent::Paste(text) => {
                if self.session.phase() != Phase::Reading {
                    for key in input::from_paste(&text) {
                        self.apply(SessionEvent::Key(key), now);
                    }
                }
                AppControl::Continue
            }
            TarotEvent::Key(key) => {
                let sub_phase = self.session.capture().sub_phase;
                match input::from_key_event(&key, self.session.phase(), sub_phase) {
                    Action::Quit => AppControl::Quit,
                    Action::Ignore => AppControl::Continue,
                    Action::Session(ev) => {
                        self.apply(ev, now);
                        AppControl::Continue
                    }
                }
            }
        }
    }

    pub fn apply(&mut self, event: SessionEvent, now: u64) {
        if let SessionEvent::Key(key) = event {
            if self.session.phase() == Phase::Reveal {
                self.highlight = Some(Highlight {
                    key,
                    until: now + self.config.highlight_ms,
                });
            }
        }
        if event == SessionEvent::Reset {
            self.highlight = None;
        }
        self.session = std::mem::take(&mut self.session).apply(event, now);
    }
}
