//! Expense CLI commands
//!
//! `add`, `list` and `delete`: the everyday commands.

use clap::Args;

use crate::clock::Clock;
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_table};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Frequency;
use crate::services::{
    parse_amount, parse_date, CategorySelector, CreateExpenseInput, ExpenseFilter, ExpenseService,
};
use crate::storage::Storage;

/// Arguments for `expense add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount spent (e.g. "12.50")
    #[arg(allow_hyphen_values = true)]
    pub amount: String,

    /// Category name
    #[arg(short, long, default_value = "Other")]
    pub category: String,

    /// Date of the expense (YYYY-MM-DD, default today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Make this a recurring expense (daily, weekly or monthly)
    #[arg(short, long, value_name = "FREQUENCY")]
    pub every: Option<String>,
}

/// Arguments for `expense list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only categories containing this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only this category ("All" for every category)
    #[arg(short, long, default_value = "All")]
    pub category: String,

    /// Maximum number of expenses to show
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Handle `expense add`
pub fn handle_add(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    args: AddArgs,
) -> ExpenseResult<()> {
    let amount = parse_amount(&args.amount)?;
    let date = match args.date.as_deref() {
        Some(d) => parse_date(d)?,
        None => clock.today(),
    };
    let frequency = match args.every.as_deref() {
        Some(f) => Some(Frequency::parse(f).ok_or_else(|| {
            ExpenseError::Validation(format!(
                "Unknown frequency '{}', expected daily, weekly or monthly",
                f
            ))
        })?),
        None => None,
    };

    let service = ExpenseService::new(&storage.expenses, &storage.reminders, settings.reminder_hour);
    let expense = service.create(CreateExpenseInput {
        amount,
        category: args.category,
        date,
        frequency,
    })?;

    if expense.is_recurring {
        println!("Added recurring expense:");
    } else {
        println!("Added expense:");
    }
    print!("{}", format_expense_details(&expense, &settings.currency_symbol));
    Ok(())
}

/// Handle `expense list`
pub fn handle_list(storage: &Storage, settings: &Settings, args: ListArgs) -> ExpenseResult<()> {
    let service = ExpenseService::new(&storage.expenses, &storage.reminders, settings.reminder_hour);

    let mut filter = ExpenseFilter::new()
        .query(args.search)
        .category(CategorySelector::parse(&args.category));
    if let Some(limit) = args.limit {
        filter = filter.limit(limit);
    }

    let expenses = service.list(&filter)?;
    print!(
        "{}",
        format_expense_table(&expenses, &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}

/// Handle `expense delete`
pub fn handle_delete(storage: &Storage, settings: &Settings, identifier: &str) -> ExpenseResult<()> {
    let service = ExpenseService::new(&storage.expenses, &storage.reminders, settings.reminder_hour);

    let expense = service
        .find(identifier)?
        .ok_or_else(|| ExpenseError::expense_not_found(identifier.trim()))?;
    service.delete(expense.id)?;

    println!(
        "Deleted {} ({} {} on {})",
        expense.id,
        expense.category,
        expense.amount.format_with_symbol(&settings.currency_symbol),
        expense.date
    );
    Ok(())
}
