//! Timer page: the new-cycle form and the countdown digits

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_big_text::BigTextBuilder;

use crate::form::FormField;
use crate::state::{countdown, CountdownDisplay};

use super::View;

/// Rendered width of the big "MM:SS" clock (five 8-column glyphs).
const CLOCK_WIDTH: u16 = 40;

pub fn render(frame: &mut Frame, area: Rect, view: &View) {
    let active_cycle = view.active_cycle();
    let form_enabled = active_cycle.is_none();
    let focus = view.form.focus();

    let chunks = Layout::vertical([
        Constraint::Length(1), // spacer
        Constraint::Length(1), // task line
        Constraint::Length(1), // suggestions
        Constraint::Length(1), // minutes line
        Constraint::Length(2), // validation messages
        Constraint::Length(8), // countdown digits
        Constraint::Length(1), // spacer
        Constraint::Length(1), // start/stop control
        Constraint::Min(0),
    ])
    .split(area);

    let task_line = Line::from(vec![
        Span::raw(" I will work on "),
        field(
            view.form.task(),
            "name your project",
            28,
            form_enabled && focus == FormField::Task,
            form_enabled,
        ),
    ]);
    frame.render_widget(Paragraph::new(task_line), chunks[1]);

    if form_enabled && !view.form.suggestions().is_empty() {
        let joined = view.form.suggestions().join("  ");
        let suggestions = Line::from(vec![
            Span::raw(" suggestions: ").dim(),
            Span::raw(joined).dim().italic(),
        ]);
        frame.render_widget(Paragraph::new(suggestions), chunks[2]);
    }

    let minutes_line = Line::from(vec![
        Span::raw(" for "),
        field(
            view.form.minutes(),
            "00",
            5,
            form_enabled && focus == FormField::Minutes,
            form_enabled,
        ),
        Span::raw(" minutes."),
        Span::raw("  (5-60, step 5)").dim(),
    ]);
    frame.render_widget(Paragraph::new(minutes_line), chunks[3]);

    frame.render_widget(validation_messages(view), chunks[4]);

    render_clock(frame, chunks[5], view);

    frame.render_widget(control_line(view).centered(), chunks[7]);
}

/// One form field rendered inline in the sentence, underlined like an input.
fn field(content: &str, placeholder: &str, width: usize, focused: bool, enabled: bool) -> Span<'static> {
    let shown = if content.is_empty() { placeholder } else { content };
    let padded = format!(" {:<width$} ", shown, width = width);

    let mut style = Style::new().underlined();
    if content.is_empty() || !enabled {
        style = style.dim();
    }
    if enabled && focused {
        style = style.bold().fg(Color::Cyan);
    }

    Span::styled(padded, style)
}

fn validation_messages(view: &View) -> Paragraph<'static> {
    let errors = view.form.errors();
    let mut lines = Vec::new();

    if let Some(message) = &errors.task {
        lines.push(Line::from(Span::styled(
            format!(" {}", message),
            Style::new().fg(Color::Red),
        )));
    }
    if let Some(message) = &errors.minutes {
        lines.push(Line::from(Span::styled(
            format!(" {}", message),
            Style::new().fg(Color::Red),
        )));
    }

    Paragraph::new(lines)
}

fn render_clock(frame: &mut Frame, area: Rect, view: &View) {
    let active_cycle = view.active_cycle();
    let display = CountdownDisplay::derive(active_cycle, view.countdown.seconds_passed);

    let style = match active_cycle {
        Some(cycle) => {
            let remaining = countdown::current_seconds(
                cycle.total_seconds(),
                view.countdown.seconds_passed,
            );
            if remaining <= 60 {
                Style::new().red()
            } else {
                Style::new().green()
            }
        }
        None => Style::new().dark_gray(),
    };

    let centered = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(CLOCK_WIDTH),
        Constraint::Min(0),
    ])
    .split(area)[1];

    let clock = BigTextBuilder::default()
        .lines(vec![display.clock().into()])
        .style(style)
        .build();
    frame.render_widget(clock, centered);
}

fn control_line(view: &View) -> Paragraph<'static> {
    let line = if view.active_cycle().is_some() {
        Line::from(Span::styled(
            "[ Stop  (esc) ]",
            Style::new().fg(Color::Red).bold(),
        ))
    } else if view.form.start_disabled() {
        Line::from(Span::styled("[ Start  (enter) ]", Style::new().dim()))
    } else {
        Line::from(Span::styled(
            "[ Start  (enter) ]",
            Style::new().fg(Color::Green).bold(),
        ))
    };

    Paragraph::new(line)
}
