//! Limit and report CLI commands
//!
//! `summary`, `report` and `limits show|set`.

use clap::Subcommand;

use crate::clock::Clock;
use crate::config::{ExpensePaths, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, Period};
use crate::reports::{LimitsReport, SpendingReport};
use crate::storage::{ExpenseStore, Storage};

/// Limit subcommands
#[derive(Subcommand, Debug)]
pub enum LimitsCommands {
    /// Show the current limits
    Show,

    /// Change a limit ("0" clears it)
    Set {
        /// daily, weekly or monthly
        period: String,
        /// New limit amount
        amount: String,
    },
}

fn parse_period(input: &str) -> ExpenseResult<Period> {
    Period::parse(input).ok_or_else(|| {
        ExpenseError::Validation(format!(
            "Unknown period '{}', expected daily, weekly or monthly",
            input
        ))
    })
}

/// Handle `expense limits`
pub fn handle_limits_command(
    paths: &ExpensePaths,
    settings: &mut Settings,
    cmd: LimitsCommands,
) -> ExpenseResult<()> {
    match cmd {
        LimitsCommands::Show => {
            for period in Period::all() {
                let limit = settings.limit(period);
                let shown = if limit.is_positive() {
                    limit.format_with_symbol(&settings.currency_symbol)
                } else {
                    "not set".to_string()
                };
                println!("{:<8} {}", period.limit_name(), shown);
            }
        }

        LimitsCommands::Set { period, amount } => {
            let period = parse_period(&period)?;
            let amount = Money::parse(&amount).map_err(|e| {
                ExpenseError::Validation(format!("Invalid limit amount: {}", e))
            })?;

            settings.set_limit(period, amount)?;
            settings.save(paths)?;

            println!(
                "{} limit set to {}",
                period.limit_name(),
                amount.format_with_symbol(&settings.currency_symbol)
            );
        }
    }

    Ok(())
}

/// Handle `expense summary`
pub fn handle_summary(storage: &Storage, settings: &Settings, clock: &dyn Clock) -> ExpenseResult<()> {
    let expenses = storage.expenses.fetch_all()?;
    let report = LimitsReport::generate(&expenses, settings, clock.today());
    print!("{}", report.format_terminal(&settings.currency_symbol));
    Ok(())
}

/// Handle `expense report`
pub fn handle_report(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    period: &str,
) -> ExpenseResult<()> {
    let period = parse_period(period)?;
    let expenses = storage.expenses.fetch_all()?;
    let report = SpendingReport::generate(&expenses, period, clock.today(), settings.week_start());
    print!("{}", report.format_terminal(&settings.currency_symbol));
    Ok(())
}
