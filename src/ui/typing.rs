use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::capture::SubPhase;
use crate::dictionary::calculate_word_validity;
use crate::session::SessionView;
use crate::ui::metrics::MetricsPanel;
use crate::ui::{HORIZONTAL_MARGIN, METRICS_PANEL_WIDTH, VERTICAL_MARGIN};
use crate::App;

/// Target sentence styled against what has been typed so far.
pub fn scripted_line(target: &str, typed: &str) -> Line<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let correct = bold.fg(Color::Green);
    let incorrect = bold.fg(Color::Red);
    let pending = bold.add_modifier(Modifier::DIM);
    let current = pending.add_modifier(Modifier::UNDERLINED);

    let typed: Vec<char> = typed.chars().collect();
    let mut spans: Vec<Span> = target
        .chars()
        .enumerate()
        .map(|(i, expected)| match typed.get(i) {
            Some(&c) if c == expected => Span::styled(c.to_string(), correct),
            Some(&c) => Span::styled(
                match c {
                    ' ' => "·".to_string(),
                    c => c.to_string(),
                },
                incorrect,
            ),
            None if i == typed.len() => Span::styled(expected.to_string(), current),
            None => Span::styled(expected.to_string(), pending),
        })
        .collect();

    // overflow past the end of the sentence
    let extra: String = typed.iter().skip(target.chars().count()).collect();
    if !extra.is_empty() {
        spans.push(Span::styled(extra.replace(' ', "·"), incorrect));
    }
    Line::from(spans)
}

pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    let SessionView::Typing {
        sub_phase,
        target,
        scripted_text,
        free_text,
        word_count,
        can_advance,
        can_submit,
    } = app.session.view()
    else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(20), Constraint::Length(METRICS_PANEL_WIDTH)])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // instruction
            Constraint::Length(4), // scripted sentence
            Constraint::Min(3),    // free text
            Constraint::Length(2), // footer
        ])
        .split(columns[0]);

    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let ready = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);

    let instruction = match sub_phase {
        SubPhase::Scripted => "Type this sentence:",
        SubPhase::Free => "Now write freely about anything on your mind...",
    };
    Paragraph::new(Span::styled(instruction, italic)).render(rows[0], buf);

    let scripted_block = Block::default().borders(Borders::ALL).title(format!(
        "{} / {} characters",
        scripted_text.chars().count(),
        target.chars().count()
    ));
    let scripted = match sub_phase {
        SubPhase::Scripted => scripted_line(target, scripted_text),
        SubPhase::Free => Line::from(Span::styled(
            scripted_text.to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    Paragraph::new(scripted)
        .block(scripted_block)
        .wrap(Wrap { trim: false })
        .render(rows[1], buf);

    if sub_phase == SubPhase::Free {
        let validity = calculate_word_validity(free_text);
        Paragraph::new(format!("{free_text}▏"))
            .block(Block::default().borders(Borders::ALL).title(format!(
                "{word_count} words / {}% recognized",
                validity.validity_rate
            )))
            .wrap(Wrap { trim: false })
            .render(rows[2], buf);
    }

    let footer = match (sub_phase, can_advance, can_submit) {
        (SubPhase::Scripted, true, _) => Span::styled("Press Enter to continue", ready),
        (SubPhase::Free, _, true) => Span::styled("Press Enter to get your reading", ready),
        _ => Span::styled("(esc to quit)", italic.add_modifier(Modifier::DIM)),
    };
    Paragraph::new(footer)
        .alignment(Alignment::Center)
        .render(rows[3], buf);

    let capture = app.session.capture();
    let keystrokes: Vec<_> = capture
        .scripted_keystrokes
        .iter()
        .chain(&capture.free_keystrokes)
        .copied()
        .collect();
    let snapshot = app.metrics();
    MetricsPanel {
        snapshot: &snapshot,
        keystrokes: &keystrokes,
    }
    .render(columns[1], buf);
}
