use ratatui::{buffer::Buffer, layout::Rect};

use crate::session::Phase;
use crate::ui::{reading, reveal, typing};
use crate::App;

/// One full-screen view of the app.
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

pub struct RevealScreen;

impl Screen for RevealScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        reveal::render(app, area, buf);
    }
}

pub struct TypingScreen;

impl Screen for TypingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        typing::render(app, area, buf);
    }
}

pub struct ReadingScreen;

impl Screen for ReadingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        reading::render(app, area, buf);
    }
}

pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Reveal => Box::new(RevealScreen),
        Phase::Typing => Box::new(TypingScreen),
        Phase::Reading => Box::new(ReadingScreen),
    }
}
