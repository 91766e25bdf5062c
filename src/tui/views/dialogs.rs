//! Modal dialogs: the add-expense form and delete confirmation

use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::tui::app::{App, FormField, InputField};

const LABEL_WIDTH: u16 = 12;

/// Render the add-expense form
pub fn render_expense_form(frame: &mut Frame, app: &App) {
    let area = centered_rect(56, 12, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Add Expense ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(inner);

    let form = &app.form;
    render_input(frame, rows[0], "Amount", &form.amount, form.focused == FormField::Amount);
    render_input(frame, rows[1], "Category", &form.category, form.focused == FormField::Category);
    render_input(frame, rows[2], "Date", &form.date, form.focused == FormField::Date);

    let frequency_focused = form.focused == FormField::Frequency;
    let frequency = Line::from(vec![
        label_span("Repeats", frequency_focused),
        Span::styled(
            format!("◀ {} ▶", form.frequency_label()),
            value_style(frequency_focused),
        ),
    ]);
    frame.render_widget(Paragraph::new(frequency), rows[3]);

    if let Some(error) = &form.error {
        let error = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(error, rows[5]);
    }

    let hints = Paragraph::new("Tab: next field  Enter: save  Esc: cancel")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, rows[6]);
}

fn label_span(label: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH as usize), style)
}

fn value_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn render_input(frame: &mut Frame, area: Rect, label: &str, input: &InputField, focused: bool) {
    let line = Line::from(vec![
        label_span(label, focused),
        Span::styled(input.value().to_string(), value_style(focused)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if focused {
        let x = area.x + LABEL_WIDTH + input.cursor() as u16;
        frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
    }
}

/// Render the delete confirmation for the selected row
pub fn render_confirm_delete(frame: &mut Frame, app: &App) {
    let Some(expense) = app.selected_expense() else {
        return;
    };

    let area = centered_rect(48, 7, frame.area());
    frame.render_widget(Clear, area);

    let kind = if expense.is_recurring {
        "recurring expense"
    } else {
        "expense"
    };
    let text = vec![
        Line::from(format!(
            "Delete {} {} for {}?",
            kind,
            expense.amount.format_with_symbol(&app.settings.currency_symbol),
            expense.category
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y: delete  n: keep",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Confirm ")
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(paragraph, area);
}
