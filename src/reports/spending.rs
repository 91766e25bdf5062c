//! Spending Report
//!
//! Breaks down spending by category for one period.

use std::collections::HashMap;

use chrono::{NaiveDate, Weekday};

use crate::models::{DateWindow, Expense, Money, Period};

/// Spending breakdown for one category
#[derive(Debug, Clone)]
pub struct SpendingByCategory {
    /// Category name as recorded on the expenses
    pub category: String,
    /// Total spending
    pub total: Money,
    /// Number of expenses
    pub count: usize,
    /// Percentage of total spending
    pub percentage: f64,
}

/// Spending Report
#[derive(Debug, Clone)]
pub struct SpendingReport {
    pub period: Period,
    pub window: DateWindow,
    /// Categories, largest spending first
    pub categories: Vec<SpendingByCategory>,
    pub total: Money,
    pub count: usize,
}

impl SpendingReport {
    /// Generate a spending report for the period containing `today`
    pub fn generate(
        expenses: &[Expense],
        period: Period,
        today: NaiveDate,
        week_start: Weekday,
    ) -> Self {
        let window = period.window(today, week_start);

        let mut by_category: HashMap<&str, (Money, usize)> = HashMap::new();
        let mut total = Money::zero();
        let mut count = 0;

        for expense in expenses
            .iter()
            .filter(|e| e.is_concrete() && window.contains(e.date))
        {
            let entry = by_category
                .entry(expense.category.as_str())
                .or_insert((Money::zero(), 0));
            entry.0 += expense.amount;
            entry.1 += 1;
            total += expense.amount;
            count += 1;
        }

        let mut categories: Vec<_> = by_category
            .into_iter()
            .map(|(category, (spent, n))| SpendingByCategory {
                category: category.to_string(),
                total: spent,
                count: n,
                percentage: spent.ratio_of(total).unwrap_or(0.0) * 100.0,
            })
            .collect();

        categories.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));

        Self {
            period,
            window,
            categories,
            total,
            count,
        }
    }

    /// Get top spending categories
    pub fn top_categories(&self, limit: usize) -> &[SpendingByCategory] {
        &self.categories[..limit.min(self.categories.len())]
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending Report: {} ({})\n",
            self.period.label(),
            self.window
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("No expenses in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<30} {:>12} {:>6} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for category in &self.categories {
            output.push_str(&format!(
                "{:<30} {:>12} {:>6} {:>7.1}%\n",
                category.category,
                category.total.format_with_symbol(currency),
                category.count,
                category.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>12} {:>6}\n",
            "TOTAL",
            self.total.format_with_symbol(currency),
            self.count
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generate_spending_report() {
        let today = date(2025, 1, 20);
        let expenses = vec![
            Expense::new(Money::from_cents(5000), "Food", date(2025, 1, 10)),
            Expense::new(Money::from_cents(2500), "Food", date(2025, 1, 12)),
            Expense::new(Money::from_cents(2500), "Transport", date(2025, 1, 15)),
            Expense::new(Money::from_cents(9900), "Food", date(2024, 12, 31)),
        ];

        let report = SpendingReport::generate(&expenses, Period::Month, today, Weekday::Mon);

        assert_eq!(report.total, Money::from_cents(10000));
        assert_eq!(report.count, 3);
        assert_eq!(report.categories.len(), 2);
        assert_eq!(report.categories[0].category, "Food");
        assert_eq!(report.categories[0].total, Money::from_cents(7500));
        assert!((report.categories[0].percentage - 75.0).abs() < 0.01);
        assert_eq!(report.top_categories(1).len(), 1);
        assert_eq!(report.top_categories(10).len(), 2);
    }

    #[test]
    fn test_empty_report() {
        let report = SpendingReport::generate(&[], Period::Week, date(2025, 1, 20), Weekday::Mon);
        assert!(report.categories.is_empty());
        assert!(report.format_terminal("$").contains("No expenses"));
    }

    #[test]
    fn test_format_terminal() {
        let today = date(2025, 1, 20);
        let expenses = vec![Expense::new(Money::from_cents(1234), "Shopping", today)];

        let output = SpendingReport::generate(&expenses, Period::Day, today, Weekday::Mon)
            .format_terminal("$");
        assert!(output.contains("Spending Report: Today"));
        assert!(output.contains("Shopping"));
        assert!(output.contains("$12.34"));
        assert!(output.contains("100.0%"));
    }
}
