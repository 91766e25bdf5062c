//! Recurrence engine
//!
//! Computes next due dates and turns overdue recurring templates into
//! concrete expenses ("rollover"). The planning step is a pure function of
//! the templates, the existing expenses and today's date; `RecurrenceService`
//! applies a plan to an `ExpenseStore`.

use std::collections::HashSet;

use chrono::{Days, Months, NaiveDate};
use tracing::{debug, error, info, warn};

use crate::config::RolloverPolicy;
use crate::error::ExpenseResult;
use crate::models::{Expense, ExpenseId, Frequency};
use crate::notify::{Notifier, Reminder};
use crate::storage::ExpenseStore;

/// Upper bound on occurrences one template can produce in a single catch-up run
pub const MAX_CATCH_UP_OCCURRENCES: usize = 1024;

/// The date one period after `from`
///
/// Monthly steps are calendar-aware and clamp to the end of shorter months
/// (Jan 31 becomes Feb 28 or 29). Returns `None` only past the end of the
/// representable calendar.
pub fn next_occurrence(from: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::Daily => from.checked_add_days(Days::new(1)),
        Frequency::Weekly => from.checked_add_days(Days::new(7)),
        Frequency::Monthly => from.checked_add_months(Months::new(1)),
    }
}

/// Like [`next_occurrence`], for a frequency given as text
///
/// Unrecognized frequencies yield `None`.
pub fn next_occurrence_for(from: NaiveDate, frequency: &str) -> Option<NaiveDate> {
    Frequency::parse(frequency).and_then(|f| next_occurrence(from, f))
}

/// What a rollover run would change
#[derive(Debug, Clone, Default)]
pub struct RolloverPlan {
    /// New concrete expenses, dated at their due dates
    pub created: Vec<Expense>,
    /// Templates with their `next_due_date` moved forward
    pub advanced: Vec<Expense>,
    /// Templates that are flagged recurring but cannot be scheduled
    pub skipped: Vec<ExpenseId>,
}

impl RolloverPlan {
    /// True when the plan changes nothing
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.advanced.is_empty()
    }
}

/// Plan the rollover of every overdue template
///
/// A template is overdue when its `next_due_date` is on or before `today`.
/// Each overdue occurrence becomes a concrete expense dated at the due date,
/// and the next due date is computed from that due date. Under
/// [`RolloverPolicy::OneShot`] a template advances at most one period; under
/// [`RolloverPolicy::CatchUp`] it advances until its next due date is after
/// `today`.
///
/// An occurrence already present in `existing` (same template, same date) is
/// not created again, but the template still advances past it.
pub fn rollover(
    today: NaiveDate,
    templates: &[Expense],
    existing: &[Expense],
    policy: RolloverPolicy,
) -> RolloverPlan {
    let limit = match policy {
        RolloverPolicy::OneShot => 1,
        RolloverPolicy::CatchUp => MAX_CATCH_UP_OCCURRENCES,
    };

    let materialized: HashSet<(ExpenseId, NaiveDate)> = existing
        .iter()
        .filter_map(|e| e.template_id.map(|t| (t, e.date)))
        .collect();

    let mut plan = RolloverPlan::default();

    for template in templates.iter().filter(|t| t.is_recurring) {
        let (frequency, first_due) = match (template.frequency, template.next_due_date) {
            (Some(frequency), Some(due)) => (frequency, due),
            _ => {
                warn!(id = %template.id, "recurring expense has no frequency or due date, skipping");
                plan.skipped.push(template.id);
                continue;
            }
        };

        let mut due = first_due;
        let mut steps = 0;
        while due <= today && steps < limit {
            if materialized.contains(&(template.id, due)) {
                debug!(id = %template.id, %due, "occurrence already recorded");
            } else {
                plan.created.push(template.occurrence(due));
            }

            match next_occurrence(due, frequency) {
                Some(next) => due = next,
                None => {
                    warn!(id = %template.id, %due, "no next occurrence, template stops here");
                    break;
                }
            }
            steps += 1;
        }

        if steps == MAX_CATCH_UP_OCCURRENCES && due <= today {
            warn!(
                id = %template.id,
                next_due = %due,
                "catch-up limit reached, remaining occurrences left for the next run"
            );
        }

        if due != first_due {
            let mut advanced = template.clone();
            advanced.next_due_date = Some(due);
            plan.advanced.push(advanced);
        }
    }

    plan
}

/// Applies rollover plans and keeps template reminders in step
pub struct RecurrenceService<'a> {
    store: &'a dyn ExpenseStore,
    notifier: &'a dyn Notifier,
    reminder_hour: u32,
}

impl<'a> RecurrenceService<'a> {
    /// Create a new recurrence service
    pub fn new(store: &'a dyn ExpenseStore, notifier: &'a dyn Notifier, reminder_hour: u32) -> Self {
        Self {
            store,
            notifier,
            reminder_hour,
        }
    }

    /// All recurring templates, soonest due first
    pub fn templates(&self) -> ExpenseResult<Vec<Expense>> {
        let mut templates: Vec<_> = self
            .store
            .fetch_all()?
            .into_iter()
            .filter(|e| e.is_recurring)
            .collect();
        templates.sort_by_key(|t| (t.next_due_date.is_none(), t.next_due_date));
        Ok(templates)
    }

    /// Materialize every overdue occurrence and advance the templates
    ///
    /// Saves once when anything changed. If the save fails the in-memory
    /// store keeps the changes and the error is returned.
    pub fn process_due(
        &self,
        today: NaiveDate,
        policy: RolloverPolicy,
    ) -> ExpenseResult<RolloverPlan> {
        let all = self.store.fetch_all()?;
        let (templates, existing): (Vec<_>, Vec<_>) =
            all.into_iter().partition(|e| e.is_recurring);

        let plan = rollover(today, &templates, &existing, policy);
        if plan.is_empty() {
            return Ok(plan);
        }

        for expense in &plan.created {
            self.store.insert(expense.clone())?;
        }
        for template in &plan.advanced {
            self.store.insert(template.clone())?;
        }

        if let Err(e) = self.store.save() {
            error!(error = %e, "failed to save rolled-over expenses");
            return Err(e);
        }

        for template in &plan.advanced {
            self.schedule_reminder(template);
        }

        info!(
            created = plan.created.len(),
            advanced = plan.advanced.len(),
            %policy,
            "processed recurring expenses"
        );
        Ok(plan)
    }

    /// Request a reminder for a template's next due date
    pub fn schedule_reminder(&self, template: &Expense) {
        if let Some(reminder) = Reminder::for_template(template, self.reminder_hour) {
            self.notifier.schedule(reminder);
        }
    }
}
