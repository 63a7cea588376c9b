//! Terminal UI module
//!
//! Rendering is stateless: every frame is drawn from a [`View`] assembled by
//! the event loop, so repeated renders of the same inputs produce identical
//! output.

pub mod header;
pub mod history;
pub mod home;

use ratatui::{
    layout::{Constraint, Layout},
    style::Stylize,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::form::NewCycleForm;
use crate::state::{CountdownState, Cycle};

/// Pages reachable from the navigation header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Timer,
    History,
}

/// Everything a frame needs, borrowed from the event loop for one draw call.
pub struct View<'a> {
    pub page: Page,
    pub form: &'a NewCycleForm,
    pub cycles: &'a [Cycle],
    pub countdown: &'a CountdownState,
}

impl View<'_> {
    /// The cycle the countdown snapshot points at, if it is still in the list.
    pub fn active_cycle(&self) -> Option<&Cycle> {
        let active_id = self.countdown.active_cycle_id?;
        self.cycles.iter().find(|c| c.id() == active_id)
    }
}

/// Draw one frame: header, current page, key hints.
pub fn draw(frame: &mut Frame, view: &View) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(frame.area());

    header::render(frame, chunks[0], view.page);

    match view.page {
        Page::Timer => home::render(frame, chunks[1], view),
        Page::History => history::render(frame, chunks[1], view),
    }

    frame.render_widget(footer(view), chunks[2]);
}

fn footer(view: &View) -> Paragraph<'static> {
    let hints: Vec<Span> = match (view.page, view.active_cycle().is_some()) {
        (Page::Timer, true) => vec![
            " esc ".into(),
            "interrupt".dim(),
            "  f2 ".into(),
            "history".dim(),
            "  ctrl-c ".into(),
            "quit".dim(),
        ],
        (Page::Timer, false) => vec![
            " tab ".into(),
            "field".dim(),
            "  up/down ".into(),
            "step".dim(),
            "  enter ".into(),
            "start".dim(),
            "  f2 ".into(),
            "history".dim(),
            "  ctrl-c ".into(),
            "quit".dim(),
        ],
        (Page::History, _) => vec![
            " f1 ".into(),
            "timer".dim(),
            "  q ".into(),
            "quit".dim(),
        ],
    };

    Paragraph::new(Line::from(hints)).gray()
}
