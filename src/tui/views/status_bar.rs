//! Status bar view
//!
//! Today's spend against the daily limit, the last status message, and key
//! hints for the current mode.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::dashboard::level_color;
use crate::models::Period;
use crate::tui::app::{App, InputMode};

fn hints(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Normal => " a:Add  d:Delete  /:Search  c:Category  r:Rollover  x:Export  q:Quit ",
        InputMode::Search => " Enter:Done  Esc:Clear ",
        InputMode::AddExpense => " Tab:Next  Enter:Save  Esc:Cancel ",
        InputMode::ConfirmDelete => " y:Delete  n:Keep ",
    }
}

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let report = app.limits_report();
    let mut spans = vec![];

    if let Some(today) = report.row(Period::Day) {
        spans.push(Span::styled(" Today: ", Style::default().fg(Color::White)));
        spans.push(Span::styled(
            today.spent.format_with_symbol(&app.settings.currency_symbol),
            Style::default()
                .fg(level_color(today.level))
                .add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(message.as_str(), Style::default().fg(Color::Yellow)));
    }

    let hints = hints(app.input_mode);
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize).saturating_sub(left_len + hints.len());

    spans.push(Span::raw(" ".repeat(padding.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
