//! Storage layer for expense-cli
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Services only see expenses through the `ExpenseStore` trait.

pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod memory;

pub use categories::CategoryRepository;
pub use expenses::{ExpenseRepository, ExpenseStore};
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use memory::MemoryExpenseStore;

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::notify::ReminderQueue;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: ExpensePaths,
    pub expenses: ExpenseRepository,
    pub categories: CategoryRepository,
    pub reminders: ReminderQueue,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            reminders: ReminderQueue::new(paths.reminders_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    /// Load all data from disk
    ///
    /// An unreadable expenses file does not fail the load; the expense
    /// repository starts empty and refuses to save (see
    /// [`ExpenseRepository::load_or_empty`]). The reminder queue is treated
    /// the same way.
    pub fn load_all(&mut self) -> Result<(), ExpenseError> {
        self.expenses.load_or_empty()?;
        self.categories.load()?;
        self.reminders.load_or_empty()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_load_all_survives_corrupt_expenses() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        std::fs::write(paths.expenses_file(), "[[[").unwrap();

        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        assert!(storage.expenses.is_degraded());
        assert_eq!(storage.categories.count().unwrap(), 5);
    }

    #[test]
    fn test_load_all_keeps_unreadable_reminder_queue() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        std::fs::write(paths.reminders_file(), "garbage").unwrap();

        let mut storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        assert!(storage.reminders.is_degraded());

        let reminder = crate::notify::Reminder {
            id: crate::models::ExpenseId::new(),
            title: "Recurring Expense Due".into(),
            body: "rent".into(),
            fire_at: chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        };
        crate::notify::Notifier::schedule(&storage.reminders, reminder);

        assert_eq!(std::fs::read_to_string(paths.reminders_file()).unwrap(), "garbage");
    }
}
