//! TUI views
//!
//! A tab header, the active view, the status bar, and any open dialog drawn
//! on top.

pub mod dashboard;
pub mod dialogs;
pub mod expenses;
pub mod recurring;
pub mod status_bar;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::app::{ActiveView, App, InputMode};

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let [header, main, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_tabs(frame, app, header);

    match app.active_view {
        ActiveView::Dashboard => dashboard::render(frame, app, main),
        ActiveView::Expenses => expenses::render(frame, app, main),
        ActiveView::Recurring => recurring::render(frame, app, main),
    }

    status_bar::render(frame, app, status);

    match app.input_mode {
        InputMode::AddExpense => dialogs::render_expense_form(frame, app),
        InputMode::ConfirmDelete => dialogs::render_confirm_delete(frame, app),
        InputMode::Normal | InputMode::Search => {}
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles = ActiveView::all()
        .iter()
        .enumerate()
        .map(|(i, view)| format!("{} {}", i + 1, view.title()))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" expense ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(app.active_view.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Fixed-size rect centered in `area`, shrunk to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
