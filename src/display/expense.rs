//! Expense display formatting
//!
//! Tables for the expense list and the recurring templates, plus a detail
//! view for a single record.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::Expense;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Every")]
    frequency: String,
    #[tabled(rename = "Next Due")]
    next_due: String,
}

/// Format concrete expenses as a table
pub fn format_expense_table(expenses: &[Expense], currency: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.date.format(date_format).to_string(),
        category: e.category.clone(),
        amount: e.amount.format_with_symbol(currency),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::last()).with(Alignment::right()));

    let total: crate::models::Money = expenses.iter().map(|e| e.amount).sum();
    format!(
        "{}\n{} expense(s), total {}\n",
        table,
        expenses.len(),
        total.format_with_symbol(currency)
    )
}

/// Format recurring templates as a table
pub fn format_template_table(templates: &[Expense], currency: &str) -> String {
    if templates.is_empty() {
        return "No recurring expenses.\n".to_string();
    }

    let rows = templates.iter().map(|t| TemplateRow {
        id: t.id.to_string(),
        category: t.category.clone(),
        amount: t.amount.format_with_symbol(currency),
        frequency: t
            .frequency
            .map(|f| f.to_string())
            .unwrap_or_else(|| "?".to_string()),
        next_due: t
            .next_due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:   {}\n", expense.id));
    output.push_str(&format!("Date:      {}\n", expense.date));
    output.push_str(&format!("Category:  {}\n", expense.category));
    output.push_str(&format!(
        "Amount:    {}\n",
        expense.amount.format_with_symbol(currency)
    ));

    if expense.is_recurring {
        if let Some(frequency) = expense.frequency {
            output.push_str(&format!("Repeats:   {}\n", frequency));
        }
        if let Some(due) = expense.next_due_date {
            output.push_str(&format!("Next due:  {}\n", due));
        }
    }

    if let Some(template_id) = expense.template_id {
        output.push_str(&format!("From:      {}\n", template_id));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_expense_table(&[], "$", "%Y-%m-%d"), "No expenses found.\n");
        assert_eq!(format_template_table(&[], "$"), "No recurring expenses.\n");
    }

    #[test]
    fn test_expense_table() {
        let expenses = vec![
            Expense::new(Money::from_cents(1250), "Food", date(2024, 5, 2)),
            Expense::new(Money::from_units(3), "Transport", date(2024, 5, 1)),
        ];

        let output = format_expense_table(&expenses, "€", "%d/%m/%Y");
        assert!(output.contains("Category"));
        assert!(output.contains("02/05/2024"));
        assert!(output.contains("€12.50"));
        assert!(output.contains(&expenses[0].id.to_string()));
        assert!(output.contains("2 expense(s), total €15.50"));
    }

    #[test]
    fn test_template_details() {
        let mut template =
            Expense::template(Money::from_units(50), "Food", date(2024, 1, 1), Frequency::Monthly);
        template.next_due_date = Some(date(2024, 2, 1));

        let table = format_template_table(&[template.clone()], "$");
        assert!(table.contains("Monthly"));
        assert!(table.contains("2024-02-01"));

        let details = format_expense_details(&template, "$");
        assert!(details.contains("Repeats:   Monthly"));
        assert!(details.contains("Next due:  2024-02-01"));
    }
}
