use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

pub const TICK_RATE_MS: u64 = 50;

/// Everything the app loop reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TarotEvent {
    Key(KeyEvent),
    /// Text delivered in one piece by bracketed paste.
    Paste(String),
    Resize,
    Tick,
}

/// Source of terminal events. Tests swap in a channel they control.
pub trait EventSource: Send + 'static {
    /// Waits up to `timeout` for the next event.
    fn recv_timeout(&self, timeout: Duration) -> Result<TarotEvent, RecvTimeoutError>;
}

/// Reads crossterm events on a background thread.
pub struct CrosstermEventSource {
    rx: Receiver<TarotEvent>,
}

fn forward_terminal_events(tx: Sender<TarotEvent>) {
    loop {
        let ev = match event::read() {
            Ok(Event::Key(key)) => TarotEvent::Key(key),
            Ok(Event::Paste(text)) => TarotEvent::Paste(text),
            Ok(Event::Resize(_, _)) => TarotEvent::Resize,
            Ok(_) => continue,
            Err(e) => {
                tracing::error!(error = %e, "terminal event read failed");
                break;
            }
        };
        if tx.send(ev).is_err() {
            break;
        }
    }
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || forward_terminal_events(tx));
        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TarotEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-backed source for driving the app without a terminal.
pub struct TestEventSource {
    rx: Receiver<TarotEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TarotEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TarotEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Next event, or a tick if nothing arrives within one tick interval.
    pub fn step(&self) -> TarotEvent {
        self.event_source
            .recv_timeout(self.ticker.interval())
            .unwrap_or(TarotEvent::Tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );

        assert_eq!(runner.step(), TarotEvent::Tick);
    }

    #[test]
    fn step_returns_tick_when_disconnected() {
        let (tx, rx) = mpsc::channel::<TarotEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx), FixedTicker::default());

        assert_eq!(runner.step(), TarotEvent::Tick);
    }

    #[test]
    fn step_passes_events_through_in_order() {
        let (tx, rx) = mpsc::channel();
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        tx.send(TarotEvent::Key(key)).unwrap();
        tx.send(TarotEvent::Resize).unwrap();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(10)),
        );

        assert_eq!(runner.step(), TarotEvent::Key(key));
        assert_eq!(runner.step(), TarotEvent::Resize);
    }
}
