//! Dashboard view
//!
//! One gauge per spending limit, coloured by how close the spend is to the
//! limit, and this month's spending by category.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem},
    Frame,
};

use crate::reports::{LimitLevel, LimitRow};
use crate::tui::app::App;

/// Gauge colour for a limit level
pub fn level_color(level: LimitLevel) -> Color {
    match level {
        LimitLevel::NoLimit => Color::DarkGray,
        LimitLevel::UnderLimit => Color::Green,
        LimitLevel::NearLimit => Color::Yellow,
        LimitLevel::OverLimit => Color::Red,
    }
}

/// Text drawn inside a limit gauge
pub fn gauge_label(row: &LimitRow, currency: &str) -> String {
    let spent = row.spent.format_with_symbol(currency);
    match row.percentage() {
        Some(pct) => format!(
            "{} of {} ({:.0}%)",
            spent,
            row.limit.format_with_symbol(currency),
            pct
        ),
        None => format!("{} spent, {}", spent, row.level.label()),
    }
}

/// Render the dashboard
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let report = app.limits_report();
    let currency = &app.settings.currency_symbol;

    let mut constraints: Vec<Constraint> = report.rows.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(3));
    let chunks = Layout::vertical(constraints).split(area);

    for (row, chunk) in report.rows.iter().zip(chunks.iter()) {
        let color = level_color(row.level);
        let title = format!(" {} · {} ", row.period.label(), row.level.label());
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(color)),
            )
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .ratio(row.gauge_ratio())
            .label(gauge_label(row, currency));
        frame.render_widget(gauge, *chunk);
    }

    if let Some(breakdown_area) = chunks.last() {
        render_breakdown(frame, app, *breakdown_area);
    }
}

fn render_breakdown(frame: &mut Frame, app: &App, area: Rect) {
    let report = app.month_report();
    let currency = &app.settings.currency_symbol;

    let items: Vec<ListItem> = if report.categories.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No spending this month",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        report
            .categories
            .iter()
            .map(|c| {
                let color = app.category_color(&c.category).unwrap_or(Color::White);
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<16}", c.category), Style::default().fg(color)),
                    Span::raw(format!(
                        "{:>12}  {:>5.1}%",
                        c.total.format_with_symbol(currency),
                        c.percentage
                    )),
                ]))
            })
            .collect()
    };

    let title = format!(
        " This month: {} over {} expense(s) ",
        report.total.format_with_symbol(currency),
        report.count
    );
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
    );

    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateWindow, Money, Period};
    use chrono::NaiveDate;

    fn row(spent: i64, limit: i64) -> LimitRow {
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let spent = Money::from_units(spent);
        let limit = Money::from_units(limit);
        LimitRow {
            period: Period::Day,
            window: DateWindow { start: day, end: day },
            spent,
            limit,
            level: LimitLevel::classify(spent, limit),
        }
    }

    #[test]
    fn test_gauge_colors_follow_level() {
        assert_eq!(level_color(row(10, 100).level), Color::Green);
        assert_eq!(level_color(row(85, 100).level), Color::Yellow);
        assert_eq!(level_color(row(120, 100).level), Color::Red);
        assert_eq!(level_color(row(10, 0).level), Color::DarkGray);
    }

    #[test]
    fn test_gauge_labels() {
        assert_eq!(gauge_label(&row(45, 100), "$"), "$45.00 of $100.00 (45%)");
        assert_eq!(gauge_label(&row(45, 0), "$"), "$45.00 spent, Limit not set");
    }
}
