//! File-backed reminder queue
//!
//! Reminders live in `reminders.json` until the CLI starts at or after their
//! fire time, at which point they are taken off the queue and printed.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use chrono::NaiveDateTime;
use tracing::{debug, error, warn};

use crate::error::ExpenseError;
use crate::models::ExpenseId;
use crate::storage::{read_json, write_json_atomic};

use super::{Notifier, Reminder};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ReminderData {
    reminders: Vec<Reminder>,
}

/// Pending reminders keyed by template id
pub struct ReminderQueue {
    path: PathBuf,
    reminders: RwLock<HashMap<ExpenseId, Reminder>>,
    /// Set when the file existed but could not be read
    degraded: AtomicBool,
}

impl ReminderQueue {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            reminders: RwLock::new(HashMap::new()),
            degraded: AtomicBool::new(false),
        }
    }

    /// Load the queue from disk
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: ReminderData = read_json(&self.path)?;

        let mut reminders = self
            .reminders
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        reminders.clear();
        for reminder in file_data.reminders {
            reminders.insert(reminder.id, reminder);
        }
        self.degraded.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Load the queue, starting empty if the file is unreadable
    ///
    /// Like the expense repository, a queue that failed to load refuses to
    /// save, so reminders scheduled this run stay in memory only.
    pub fn load_or_empty(&self) -> Result<(), ExpenseError> {
        match self.load() {
            Ok(()) => Ok(()),
            Err(e) => {
                error!(error = %e, path = %self.path.display(), "failed to read reminder queue, starting empty");
                let mut reminders = self.reminders.write().map_err(|e| {
                    ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
                })?;
                reminders.clear();
                self.degraded.store(true, Ordering::SeqCst);
                Ok(())
            }
        }
    }

    /// Whether the last load failed
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::SeqCst)
    }

    /// Save the queue to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        if self.is_degraded() {
            return Err(ExpenseError::Storage(format!(
                "{} could not be read earlier; refusing to overwrite it",
                self.path.display()
            )));
        }

        let reminders = self.pending()?;
        write_json_atomic(&self.path, &ReminderData { reminders })
    }

    /// All queued reminders, soonest first
    pub fn pending(&self) -> Result<Vec<Reminder>, ExpenseError> {
        let reminders = self
            .reminders
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = reminders.values().cloned().collect();
        list.sort_by_key(|r| r.fire_at);
        Ok(list)
    }

    /// Remove and return every reminder whose fire time has passed
    pub fn take_due(&self, now: NaiveDateTime) -> Result<Vec<Reminder>, ExpenseError> {
        let mut due: Vec<_> = {
            let mut reminders = self.reminders.write().map_err(|e| {
                ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;

            let ids: Vec<_> = reminders
                .values()
                .filter(|r| r.is_due(now))
                .map(|r| r.id)
                .collect();
            ids.iter().filter_map(|id| reminders.remove(id)).collect()
        };

        if !due.is_empty() {
            self.save()?;
        }
        due.sort_by_key(|r| r.fire_at);
        Ok(due)
    }

    fn persist(&self, action: &str) {
        if let Err(e) = self.save() {
            warn!(error = %e, action, "failed to update reminder queue");
        }
    }
}

impl Notifier for ReminderQueue {
    fn schedule(&self, reminder: Reminder) {
        match self.reminders.write() {
            Ok(mut reminders) => {
                debug!(id = %reminder.id, fire_at = %reminder.fire_at, "scheduled reminder");
                reminders.insert(reminder.id, reminder);
            }
            Err(e) => {
                warn!(error = %e, "reminder queue lock poisoned");
                return;
            }
        }
        self.persist("schedule");
    }

    fn cancel(&self, id: ExpenseId) {
        let removed = match self.reminders.write() {
            Ok(mut reminders) => reminders.remove(&id).is_some(),
            Err(e) => {
                warn!(error = %e, "reminder queue lock poisoned");
                return;
            }
        };
        if removed {
            debug!(%id, "cancelled reminder");
            self.persist("cancel");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_queue() -> (TempDir, ReminderQueue) {
        let temp_dir = TempDir::new().unwrap();
        let queue = ReminderQueue::new(temp_dir.path().join("reminders.json"));
        (temp_dir, queue)
    }

    fn reminder(id: ExpenseId, day: u32, body: &str) -> Reminder {
        Reminder {
            id,
            title: "Recurring Expense Due".into(),
            body: body.into(),
            fire_at: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_reschedule_replaces() {
        let (_temp_dir, queue) = create_test_queue();
        let id = ExpenseId::new();

        queue.schedule(reminder(id, 1, "first"));
        queue.schedule(reminder(id, 8, "second"));

        let pending = queue.pending().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].body, "second");
    }

    #[test]
    fn test_cancel() {
        let (_temp_dir, queue) = create_test_queue();
        let id = ExpenseId::new();

        queue.schedule(reminder(id, 1, "rent"));
        queue.cancel(id);
        queue.cancel(ExpenseId::new());

        assert!(queue.pending().unwrap().is_empty());
    }

    #[test]
    fn test_take_due_removes_only_due() {
        let (temp_dir, queue) = create_test_queue();
        queue.schedule(reminder(ExpenseId::new(), 1, "early"));
        queue.schedule(reminder(ExpenseId::new(), 20, "late"));

        let now = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let due = queue.take_due(now).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].body, "early");

        let reloaded = ReminderQueue::new(temp_dir.path().join("reminders.json"));
        reloaded.load().unwrap();
        let pending = reloaded.pending().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].body, "late");
    }

    #[test]
    fn test_unreadable_queue_is_not_overwritten() {
        let (temp_dir, queue) = create_test_queue();
        let path = temp_dir.path().join("reminders.json");
        std::fs::write(&path, "{not json").unwrap();

        queue.load_or_empty().unwrap();
        assert!(queue.is_degraded());
        assert!(queue.pending().unwrap().is_empty());

        queue.schedule(reminder(ExpenseId::new(), 1, "rent"));
        assert_eq!(queue.pending().unwrap().len(), 1);
        assert!(matches!(queue.save(), Err(ExpenseError::Storage(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }
}
