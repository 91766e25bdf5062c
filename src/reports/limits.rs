//! Spend-vs-limit report
//!
//! Totals concrete expenses for today, this week and this month and compares
//! each total with the matching limit from the settings.

use chrono::{NaiveDate, Weekday};

use crate::config::Settings;
use crate::models::{DateWindow, Expense, Money, Period};

/// Share of a limit at which spending counts as "near" the limit
pub const NEAR_LIMIT_RATIO: f64 = 0.8;

/// Sum of concrete expenses dated inside `window`
///
/// Recurring templates are never counted.
pub fn period_total(expenses: &[Expense], window: DateWindow) -> Money {
    expenses
        .iter()
        .filter(|e| e.is_concrete() && window.contains(e.date))
        .map(|e| e.amount)
        .sum()
}

/// How close spending is to its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitLevel {
    /// The limit is zero or negative
    NoLimit,
    /// Under 80% of the limit
    UnderLimit,
    /// From 80% up to the limit
    NearLimit,
    /// At or over the limit
    OverLimit,
}

impl LimitLevel {
    /// Classify `spent` against `limit`
    pub fn classify(spent: Money, limit: Money) -> Self {
        match spent.ratio_of(limit) {
            None => Self::NoLimit,
            Some(ratio) if ratio >= 1.0 => Self::OverLimit,
            Some(ratio) if ratio >= NEAR_LIMIT_RATIO => Self::NearLimit,
            Some(_) => Self::UnderLimit,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NoLimit => "Limit not set",
            Self::UnderLimit => "OK",
            Self::NearLimit => "Near limit",
            Self::OverLimit => "Over limit",
        }
    }
}

/// One period's spend compared with its limit
#[derive(Debug, Clone)]
pub struct LimitRow {
    pub period: Period,
    pub window: DateWindow,
    pub spent: Money,
    pub limit: Money,
    pub level: LimitLevel,
}

impl LimitRow {
    /// Spend as a percentage of the limit, `None` when no limit is set
    pub fn percentage(&self) -> Option<f64> {
        self.spent.ratio_of(self.limit).map(|r| r * 100.0)
    }

    /// Gauge fill between 0.0 and 1.0
    pub fn gauge_ratio(&self) -> f64 {
        self.spent.ratio_of(self.limit).unwrap_or(0.0).clamp(0.0, 1.0)
    }

    /// Amount left before the limit is reached (negative when over)
    pub fn remaining(&self) -> Money {
        self.limit - self.spent
    }
}

/// Spend vs limits for every period
#[derive(Debug, Clone)]
pub struct LimitsReport {
    pub today: NaiveDate,
    pub rows: Vec<LimitRow>,
}

impl LimitsReport {
    /// Build the report from the in-memory expense list
    pub fn generate(expenses: &[Expense], settings: &Settings, today: NaiveDate) -> Self {
        Self::generate_with(expenses, today, settings.week_start(), |p| settings.limit(p))
    }

    fn generate_with(
        expenses: &[Expense],
        today: NaiveDate,
        week_start: Weekday,
        limit_for: impl Fn(Period) -> Money,
    ) -> Self {
        let rows = Period::all()
            .into_iter()
            .map(|period| {
                let window = period.window(today, week_start);
                let spent = period_total(expenses, window);
                let limit = limit_for(period);
                LimitRow {
                    period,
                    window,
                    spent,
                    limit,
                    level: LimitLevel::classify(spent, limit),
                }
            })
            .collect();

        Self { today, rows }
    }

    /// The row for one period
    pub fn row(&self, period: Period) -> Option<&LimitRow> {
        self.rows.iter().find(|r| r.period == period)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending vs Limits (as of {})\n", self.today));
        output.push_str(&"=".repeat(64));
        output.push('\n');

        for row in &self.rows {
            let limit = if row.level == LimitLevel::NoLimit {
                "-".to_string()
            } else {
                row.limit.format_with_symbol(currency)
            };
            let percent = row
                .percentage()
                .map(|p| format!("{:.0}%", p))
                .unwrap_or_default();

            output.push_str(&format!(
                "{:<11} {:>12} / {:<12} {} {:>5}  {}\n",
                row.period.label(),
                row.spent.format_with_symbol(currency),
                limit,
                text_gauge(row.gauge_ratio(), 16),
                percent,
                row.level.label()
            ));
        }

        output
    }
}

fn text_gauge(ratio: f64, width: usize) -> String {
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}
