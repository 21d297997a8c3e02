use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::keystroke::Key;

pub const KEYBOARD_ROWS: [&str; 4] = ["!\"#$%&'()*+=", "qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// Typewriter keys, lighting up the most recent press.
pub struct Keyboard {
    pub pressed: Option<Key>,
}

impl Keyboard {
    fn is_pressed(&self, c: char) -> bool {
        self.pressed.and_then(|k| k.lowercase()) == Some(c)
    }

    fn key_span(&self, label: String, lit: bool) -> Span<'static> {
        let style = if lit {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        Span::styled(label, style)
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines: Vec<Line> = KEYBOARD_ROWS
            .iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .chars()
                    .map(|c| self.key_span(format!("({c})"), self.is_pressed(c)))
                    .collect();
                Line::from(spans)
            })
            .collect();

        lines.push(Line::from(vec![
            self.key_span("[      space      ]".to_string(), self.is_pressed(' ')),
            Span::raw(" "),
            self.key_span("[ ⌫ ]".to_string(), self.pressed == Some(Key::Backspace)),
        ]));
        lines
    }
}

impl Widget for Keyboard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines())
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
