//! Expense list view
//!
//! Search box and category filter above a table of concrete expenses,
//! newest first.

use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::tui::app::{App, InputMode};

/// Render the expense list
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let [filter_area, table_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);

    render_filter(frame, app, filter_area);
    render_table(frame, app, table_area);
}

fn render_filter(frame: &mut Frame, app: &App, area: Rect) {
    let searching = app.input_mode == InputMode::Search;
    let border = if searching { Color::Cyan } else { Color::DarkGray };

    let query = if app.search.value().is_empty() && !searching {
        Span::styled("press / to search", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.search.value())
    };

    let line = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::White)),
        query,
        Span::raw("   "),
        Span::styled("Category: ", Style::default().fg(Color::White)),
        Span::styled(app.category_filter_label(), Style::default().fg(Color::Cyan)),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(paragraph, area);

    if searching {
        let x = area.x + 1 + "Search: ".len() as u16 + app.search.cursor() as u16;
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let expenses = app.visible_expenses();
    let currency = &app.settings.currency_symbol;

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Category"),
        Cell::from(Line::from("Amount").right_aligned()),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let rows: Vec<Row> = expenses
        .iter()
        .map(|e| {
            let category_style = app
                .category_color(&e.category)
                .map(|c| Style::default().fg(c))
                .unwrap_or_default();
            let source = if e.template_id.is_some() { " ↻" } else { "" };
            Row::new(vec![
                Cell::from(e.date.format(&app.settings.date_format).to_string()),
                Cell::from(Line::from(vec![
                    Span::styled(e.category.clone(), category_style),
                    Span::styled(source, Style::default().fg(Color::DarkGray)),
                ])),
                Cell::from(Line::from(e.amount.format_with_symbol(currency)).right_aligned()),
            ])
        })
        .collect();

    let total: crate::models::Money = expenses.iter().map(|e| e.amount).sum();
    let title = format!(
        " Expenses ({}) · {} ",
        expenses.len(),
        total.format_with_symbol(currency)
    );

    let widths = [
        Constraint::Length(14),
        Constraint::Min(16),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !expenses.is_empty() {
        state.select(Some(app.selected_index.min(expenses.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
