//! Work done on every CLI start
//!
//! Reminders whose time has come are taken off the queue for printing, and
//! due recurring expenses are rolled over (when `auto_rollover` is on).
//! Failures here are logged and never stop the command the user asked for.

use std::collections::HashSet;

use tracing::warn;

use crate::clock::Clock;
use crate::config::Settings;
use crate::display::{format_delivered, format_reminder_list};
use crate::error::ExpenseResult;
use crate::models::ExpenseId;
use crate::notify::Reminder;
use crate::services::{RecurrenceService, RolloverPlan};
use crate::storage::Storage;

/// Collect due reminders, then roll over due templates
///
/// Rollover works by date and reschedules each advanced template's reminder,
/// so a reminder firing later today would be replaced before its hour. Those
/// displaced reminders are delivered along with the ones already due.
pub fn process_startup(storage: &Storage, settings: &Settings, clock: &dyn Clock) -> Vec<Reminder> {
    let mut delivered = match storage.reminders.take_due(clock.now()) {
        Ok(due) => due,
        Err(e) => {
            warn!(error = %e, "could not read due reminders");
            Vec::new()
        }
    };

    if settings.auto_rollover {
        let today = clock.today();
        let due_today: Vec<Reminder> = storage
            .reminders
            .pending()
            .unwrap_or_else(|e| {
                warn!(error = %e, "could not read pending reminders");
                Vec::new()
            })
            .into_iter()
            .filter(|r| r.fire_at.date() <= today)
            .collect();

        match run_rollover(storage, settings, clock) {
            Ok(plan) => {
                let advanced: HashSet<ExpenseId> = plan.advanced.iter().map(|t| t.id).collect();
                delivered.extend(due_today.into_iter().filter(|r| advanced.contains(&r.id)));
            }
            Err(e) => warn!(error = %e, "automatic rollover failed"),
        }
    }

    delivered.sort_by_key(|r| r.fire_at);
    delivered
}

fn run_rollover(storage: &Storage, settings: &Settings, clock: &dyn Clock) -> ExpenseResult<RolloverPlan> {
    RecurrenceService::new(&storage.expenses, &storage.reminders, settings.reminder_hour)
        .process_due(clock.today(), settings.rollover_policy)
}

/// Print reminders delivered at startup
pub fn print_delivered(reminders: &[Reminder]) {
    if !reminders.is_empty() {
        print!("{}", format_delivered(reminders));
        println!();
    }
}

/// Handle `expense reminders`
pub fn handle_reminders(storage: &Storage) -> ExpenseResult<()> {
    let pending = storage.reminders.pending()?;
    print!("{}", format_reminder_list(&pending));
    Ok(())
}
