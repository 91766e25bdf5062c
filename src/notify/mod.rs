//! Due-date reminders for recurring expenses
//!
//! Core logic only talks to the [`Notifier`] capability. Scheduling is
//! fire-and-forget: implementations log their own failures and never report
//! them back to the caller.

pub mod queue;

pub use queue::ReminderQueue;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Expense, ExpenseId};

/// Reminder title shown for every recurring expense
pub const REMINDER_TITLE: &str = "Recurring Expense Due";

/// A pending reminder, keyed by the template it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ExpenseId,
    pub title: String,
    pub body: String,
    pub fire_at: NaiveDateTime,
}

impl Reminder {
    /// Build the reminder for a template's next due date
    ///
    /// Returns `None` for concrete expenses and for templates without a
    /// frequency or due date. The reminder fires at `hour` o'clock on the
    /// due date.
    pub fn for_template(template: &Expense, hour: u32) -> Option<Self> {
        if !template.is_recurring {
            return None;
        }
        let frequency = template.frequency?;
        let due = template.next_due_date?;
        let time = NaiveTime::from_hms_opt(hour.min(23), 0, 0)?;

        Some(Self {
            id: template.id,
            title: REMINDER_TITLE.to_string(),
            body: format!(
                "Your {} expense of {} for {} is due.",
                frequency.adjective(),
                template.amount,
                template.category
            ),
            fire_at: due.and_time(time),
        })
    }

    /// Whether the reminder should have fired by `now`
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.fire_at <= now
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.body)
    }
}

/// Something that can deliver reminders later
pub trait Notifier {
    /// Request a reminder, replacing any earlier request with the same id
    fn schedule(&self, reminder: Reminder);

    /// Withdraw the reminder for `id`, if any
    fn cancel(&self, id: ExpenseId);
}

/// A notifier that drops every request
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn schedule(&self, _reminder: Reminder) {}

    fn cancel(&self, _id: ExpenseId) {}
}
