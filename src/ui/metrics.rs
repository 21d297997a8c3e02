use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::keystroke::Keystroke;
use crate::metrics::MetricsSnapshot;
use crate::ui::charting::RhythmBars;

pub fn rhythm_quality(variance: f64) -> &'static str {
    if variance == 0.0 {
        "Perfect"
    } else if variance < 100.0 {
        "Very Consistent"
    } else if variance < 200.0 {
        "Consistent"
    } else if variance < 400.0 {
        "Variable"
    } else {
        "Irregular"
    }
}

pub fn accuracy_color(accuracy: f64) -> Color {
    if accuracy >= 95.0 {
        Color::Green
    } else if accuracy >= 80.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Live metrics card shown next to the typing areas.
pub struct MetricsPanel<'a> {
    pub snapshot: &'a MetricsSnapshot,
    pub keystrokes: &'a [Keystroke],
}

impl MetricsPanel<'_> {
    fn lines(&self) -> Vec<Line<'static>> {
        let m = self.snapshot;
        let label = Style::default().add_modifier(Modifier::DIM);
        let value = Style::default().add_modifier(Modifier::BOLD);

        let row = |name: &'static str, text: String, style: Style| {
            Line::from(vec![
                Span::styled(format!("{name:<12}"), label),
                Span::styled(text, style),
            ])
        };

        let mut lines = vec![
            row("speed", format!("{} wpm", m.wpm), value.fg(Color::Blue)),
            row(
                "accuracy",
                format!("{}%", m.accuracy),
                value.fg(accuracy_color(m.accuracy)),
            ),
        ];
        if let Some(progress) = m.progress {
            lines.push(row("progress", format!("{progress}%"), value.fg(Color::Magenta)));
        }
        if let Some(words) = m.word_count {
            lines.push(row("words", words.to_string(), value));
        }
        lines.extend([
            row("keystrokes", m.total_keystrokes.to_string(), value.fg(Color::Cyan)),
            row("typos", m.total_typos.to_string(), value.fg(Color::Red)),
            row("rhythm", format!("{} ms", m.average_rhythm), value),
            row(
                "consistency",
                format!("{} ({} ms)", rhythm_quality(m.rhythm_variance), m.rhythm_variance),
                value,
            ),
        ]);

        if m.total_keystrokes == 0 {
            lines.push(Line::from(Span::styled(
                "Start typing to see your metrics!",
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    }
}

impl Widget for MetricsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title("Keystroke Metrics");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.lines();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(lines.len() as u16), Constraint::Min(0)])
            .split(inner);

        Paragraph::new(lines).render(chunks[0], buf);
        if self.snapshot.average_rhythm > 0.0 {
            RhythmBars::new(self.keystrokes).render(chunks[1], buf);
        }
    }
}
