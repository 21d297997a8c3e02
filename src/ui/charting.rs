use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{BarChart, Widget},
};

use crate::keystroke::Keystroke;

pub const RHYTHM_BAR_COUNT: usize = 20;
/// Intervals at or above this fill a whole bar.
pub const RHYTHM_BAR_CEILING_MS: f64 = 500.0;

/// Bar heights in percent for the first keystroke intervals.
pub fn rhythm_bar_heights(keystrokes: &[Keystroke]) -> Vec<u64> {
    (0..RHYTHM_BAR_COUNT)
        .map(|i| {
            let interval = keystrokes.get(i).map_or(0, |k| k.time_since_last) as f64;
            ((interval / RHYTHM_BAR_CEILING_MS).min(1.0) * 100.0).round() as u64
        })
        .collect()
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.1}")
    }
}

pub struct RhythmBars {
    heights: Vec<u64>,
}

impl RhythmBars {
    pub fn new(keystrokes: &[Keystroke]) -> Self {
        Self {
            heights: rhythm_bar_heights(keystrokes),
        }
    }
}

impl Widget for RhythmBars {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let data: Vec<(&str, u64)> = self.heights.iter().map(|h| ("", *h)).collect();
        let bar_width = (area.width / RHYTHM_BAR_COUNT as u16).max(1);

        BarChart::default()
            .data(data.as_slice())
            .max(100)
            .bar_width(bar_width)
            .bar_gap(0)
            .bar_style(Style::default().fg(Color::Magenta))
            .value_style(Style::default().fg(Color::Magenta))
            .render(area, buf);
    }
}
