pub mod charting;
pub mod keyboard;
pub mod metrics;
pub mod reading;
pub mod reveal;
pub mod screen;
pub mod typing;

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, Frame};
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const METRICS_PANEL_WIDTH: u16 = 36;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.session.phase()).render(self, area, buf);
    }
}

/// Rows needed to show `text` wrapped at `width` columns.
pub fn occupied_lines(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    (text.width() as f64 / width as f64).ceil().max(1.0) as u16
}

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
