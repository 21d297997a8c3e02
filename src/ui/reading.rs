use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::archetype::Reading;
use crate::session::SessionView;
use crate::ui::charting::{format_label, RhythmBars};
use crate::ui::{HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::App;

const CONSISTENT_BELOW_MS: f64 = 200.0;

pub fn rhythm_summary(rhythm_variance: f64) -> &'static str {
    if rhythm_variance < CONSISTENT_BELOW_MS {
        "Consistent"
    } else {
        "Variable"
    }
}

pub fn summary_line(reading: &Reading) -> Line<'static> {
    let label = Style::default().add_modifier(Modifier::DIM);
    let value = Style::default().add_modifier(Modifier::BOLD);
    let m = &reading.metrics;

    Line::from(vec![
        Span::styled("Speed ", label),
        Span::styled(format!("{} WPM", format_label(m.wpm)), value),
        Span::raw("   "),
        Span::styled("Accuracy ", label),
        Span::styled(format!("{}%", format_label(m.accuracy)), value),
        Span::raw("   "),
        Span::styled("Rhythm ", label),
        Span::styled(rhythm_summary(m.rhythm_variance), value),
    ])
}

pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    let SessionView::Reading(reading) = app.session.view() else {
        return;
    };
    let archetype = reading.archetype;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(1), // traits
            Constraint::Min(4),    // narrative
            Constraint::Length(1), // metrics summary
            Constraint::Length(4), // rhythm
            Constraint::Length(1), // legend
        ])
        .split(area);

    let title_style = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);
    Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{}  {}", archetype.symbol, archetype.name),
            title_style,
        )),
        Line::from(Span::styled(
            archetype.description,
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(rows[0], buf);

    let badge = Style::default().fg(Color::Black).bg(Color::Cyan);
    let traits: Vec<Span> = reading
        .traits()
        .iter()
        .flat_map(|t| [Span::styled(format!(" {t} "), badge), Span::raw(" ")])
        .collect();
    Paragraph::new(Line::from(traits))
        .alignment(Alignment::Center)
        .render(rows[1], buf);

    Paragraph::new(reading.text())
        .block(Block::default().borders(Borders::ALL).title("Your Reading"))
        .wrap(Wrap { trim: true })
        .render(rows[2], buf);

    Paragraph::new(summary_line(reading))
        .alignment(Alignment::Center)
        .render(rows[3], buf);

    let capture = app.session.capture();
    let keystrokes: Vec<_> = capture
        .scripted_keystrokes
        .iter()
        .chain(&capture.free_keystrokes)
        .copied()
        .collect();
    RhythmBars::new(&keystrokes).render(rows[4], buf);

    Paragraph::new(Span::styled(
        "(r)estart / (q)uit",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(rows[5], buf);
}
