//! Recurring expense view

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::tui::app::App;

/// Render the list of recurring templates
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let templates = app.templates();
    let currency = &app.settings.currency_symbol;
    let today = app.clock.today();

    let header = Row::new(vec!["Category", "Amount", "Every", "Next due"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = templates
        .iter()
        .map(|t| {
            let (next_due, due_style) = match t.next_due_date {
                Some(date) if t.is_due(today) => {
                    (date.to_string(), Style::default().fg(Color::Yellow))
                }
                Some(date) => (date.to_string(), Style::default()),
                None => ("-".to_string(), Style::default().fg(Color::DarkGray)),
            };
            let every = t.frequency.map(|f| f.to_string()).unwrap_or_default();

            Row::new(vec![
                Cell::from(t.category.clone()),
                Cell::from(Line::from(t.amount.format_with_symbol(currency)).right_aligned()),
                Cell::from(every),
                Cell::from(next_due).style(due_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Recurring ({}) · r to roll over ", templates.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !templates.is_empty() {
        state.select(Some(app.selected_index.min(templates.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
