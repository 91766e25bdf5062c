//! Recurring expense CLI commands

use clap::Subcommand;

use crate::clock::Clock;
use crate::config::{RolloverPolicy, Settings};
use crate::display::format_template_table;
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::RecurrenceService;
use crate::storage::Storage;

/// Recurring subcommands
#[derive(Subcommand, Debug)]
pub enum RecurringCommands {
    /// List recurring expenses and their next due dates
    List,

    /// Turn overdue recurring expenses into expenses now
    Run {
        /// one-shot (one occurrence per template) or catch-up (all overdue)
        #[arg(short, long)]
        policy: Option<String>,
    },
}

/// Handle `expense recurring`
pub fn handle_recurring_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: RecurringCommands,
) -> ExpenseResult<()> {
    let service = RecurrenceService::new(&storage.expenses, &storage.reminders, settings.reminder_hour);

    match cmd {
        RecurringCommands::List => {
            let templates = service.templates()?;
            print!("{}", format_template_table(&templates, &settings.currency_symbol));
        }

        RecurringCommands::Run { policy } => {
            let policy = match policy.as_deref() {
                Some(p) => RolloverPolicy::parse(p).ok_or_else(|| {
                    ExpenseError::Validation(format!(
                        "Unknown policy '{}', expected one-shot or catch-up",
                        p
                    ))
                })?,
                None => settings.rollover_policy,
            };

            let plan = service.process_due(clock.today(), policy)?;
            if plan.is_empty() {
                println!("No recurring expenses are due.");
            } else {
                println!(
                    "Created {} expense(s) from {} recurring expense(s).",
                    plan.created.len(),
                    plan.advanced.len()
                );
                for expense in &plan.created {
                    println!(
                        "  {}  {:<15} {}",
                        expense.date,
                        expense.category,
                        expense.amount.format_with_symbol(&settings.currency_symbol)
                    );
                }
            }
            if !plan.skipped.is_empty() {
                println!(
                    "Skipped {} recurring expense(s) with no schedule.",
                    plan.skipped.len()
                );
            }
        }
    }

    Ok(())
}
