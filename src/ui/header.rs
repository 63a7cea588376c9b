//! Navigation header: application name plus the two page tabs

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Tabs,
    Frame,
};

use super::Page;

pub fn render(frame: &mut Frame, area: Rect, page: Page) {
    let chunks = Layout::horizontal([Constraint::Length(14), Constraint::Min(0)]).split(area);

    let logo = Line::from(Span::styled(
        " focus-timer ",
        Style::new().bold().fg(Color::Cyan),
    ));
    frame.render_widget(logo, chunks[0]);

    let tabs = Tabs::new(vec![
        Line::from(" Timer [F1] "),
        Line::from(" History [F2] "),
    ])
    .select(match page {
        Page::Timer => 0,
        Page::History => 1,
    })
    .highlight_style(Style::new().bold().fg(Color::Yellow));

    frame.render_widget(tabs, chunks[1]);
}
