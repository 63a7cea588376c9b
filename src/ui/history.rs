//! History page: the retained cycle list, most recent first

use chrono::Local;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::state::Cycle;

use super::View;

pub fn render(frame: &mut Frame, area: Rect, view: &View) {
    if view.cycles.is_empty() {
        let empty = Paragraph::new(Line::from(
            Span::raw("No cycles yet. Start one on the timer page.").dim(),
        ))
        .centered();
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(["Task", "Duration", "Started", "Status"]).style(Style::new().bold());

    let rows = view.cycles.iter().rev().map(|cycle| {
        Row::new(vec![
            Cell::from(cycle.task().to_string()),
            Cell::from(format!("{} min", cycle.minutes_amount())),
            Cell::from(
                cycle
                    .start_date()
                    .with_timezone(&Local)
                    .format("%H:%M:%S")
                    .to_string(),
            ),
            status_cell(cycle, view),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(Block::bordered().title(" History "));

    frame.render_widget(table, area);
}

fn status_cell(cycle: &Cycle, view: &View) -> Cell<'static> {
    if view.countdown.active_cycle_id == Some(cycle.id()) {
        Cell::from(Span::styled("Ongoing", Style::new().fg(Color::Green)))
    } else if cycle.is_interrupted() {
        Cell::from(Span::styled("Interrupted", Style::new().fg(Color::Red)))
    } else {
        // Only reachable if a cycle was displaced without an interrupt record.
        Cell::from(Span::raw("Ended").dim())
    }
}
