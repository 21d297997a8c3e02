use std::collections::BTreeSet;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::reveal::{is_shown, RevealStatus};
use crate::session::SessionView;
use crate::ui::keyboard::Keyboard;
use crate::ui::metrics::MetricsPanel;
use crate::ui::{occupied_lines, HORIZONTAL_MARGIN, METRICS_PANEL_WIDTH, VERTICAL_MARGIN};
use crate::App;

pub const HIDDEN_GLYPH: char = '█';

/// The message with every unrevealed letter masked.
pub fn masked_message(message: &str, revealed: &BTreeSet<char>) -> Line<'static> {
    let shown = Style::default().add_modifier(Modifier::BOLD);
    let hidden = Style::default().fg(Color::DarkGray);

    let spans: Vec<Span> = message
        .chars()
        .map(|c| {
            if is_shown(c, revealed) {
                Span::styled(c.to_string(), shown)
            } else {
                Span::styled(HIDDEN_GLYPH.to_string(), hidden)
            }
        })
        .collect();
    Line::from(spans)
}

pub fn prompt(status: RevealStatus) -> Span<'static> {
    let hint = Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC);
    match status {
        RevealStatus::Inactive => {
            Span::styled("(start typing / type skip to jump ahead / esc to quit)", hint)
        }
        RevealStatus::Active => Span::styled("(type skip to jump ahead / esc to quit)", hint),
        RevealStatus::Complete => Span::styled(
            "Message revealed! Press Enter to continue",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    }
}

pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    let SessionView::Reveal { message, revealed, .. } = app.session.view() else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(20), Constraint::Length(METRICS_PANEL_WIDTH)])
        .split(area);

    // one spare row since wrapping happens at word boundaries
    let message_lines = occupied_lines(message, columns[0].width) + 1;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // title
            Constraint::Length(message_lines), // message
            Constraint::Min(0),
            Constraint::Length(5), // keyboard
            Constraint::Length(2), // prompt
        ])
        .split(columns[0]);

    Paragraph::new(Span::styled(
        "Type to reveal the hidden message...",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(rows[0], buf);

    Paragraph::new(masked_message(message, revealed))
        .wrap(Wrap { trim: false })
        .render(rows[1], buf);

    Keyboard {
        pressed: app.highlighted_key(),
    }
    .render(rows[3], buf);

    Paragraph::new(prompt(app.session.reveal().status()))
        .alignment(Alignment::Center)
        .render(rows[4], buf);

    let snapshot = app.metrics();
    MetricsPanel {
        snapshot: &snapshot,
        keystrokes: &app.session.reveal().keystrokes,
    }
    .render(columns[1], buf);
}
