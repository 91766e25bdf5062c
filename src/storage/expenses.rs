//! Expense persistence
//!
//! `ExpenseStore` is the contract the services depend on. `ExpenseRepository`
//! implements it over `expenses.json`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use tracing::{debug, error};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

/// Persistence contract for expense records
///
/// `insert` replaces any record with the same id. Changes are only durable
/// after `save`.
pub trait ExpenseStore {
    /// All records, templates included, newest date first
    fn fetch_all(&self) -> ExpenseResult<Vec<Expense>>;

    /// A single record by id
    fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>>;

    /// Insert or replace a record
    fn insert(&self, expense: Expense) -> ExpenseResult<()>;

    /// Remove a record, returning whether it existed
    fn delete(&self, id: ExpenseId) -> ExpenseResult<bool>;

    /// Persist all pending changes
    fn save(&self) -> ExpenseResult<()>;
}

/// Sort records newest date first, most recently created first within a day
pub(crate) fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

/// Serializable expense file layout
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// JSON-file backed expense store
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Set when the file existed but could not be read
    degraded: AtomicBool,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            degraded: AtomicBool::new(false),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> ExpenseResult<()> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for expense in file_data.expenses {
            data.insert(expense.id, expense);
        }
        self.degraded.store(false, Ordering::SeqCst);

        debug!(count = data.len(), path = %self.path.display(), "loaded expenses");
        Ok(())
    }

    /// Load expenses, falling back to an empty list if the file is unreadable
    ///
    /// After a failed read the repository refuses to `save`, so the
    /// unreadable file is left for the user to inspect instead of being
    /// replaced by an empty list.
    pub fn load_or_empty(&self) -> ExpenseResult<()> {
        match self.load() {
            Ok(()) => Ok(()),
            Err(e) => {
                error!(error = %e, path = %self.path.display(), "failed to fetch expenses, starting empty");
                let mut data = self.data.write().map_err(|e| {
                    ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
                })?;
                data.clear();
                self.degraded.store(true, Ordering::SeqCst);
                Ok(())
            }
        }
    }

    /// Whether the last load failed
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::SeqCst)
    }

    /// Count records
    pub fn count(&self) -> ExpenseResult<usize> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

impl ExpenseStore for ExpenseRepository {
    fn fetch_all(&self) -> ExpenseResult<Vec<Expense>> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    fn insert(&self, expense: Expense) -> ExpenseResult<()> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(expense.id, expense);
        Ok(())
    }

    fn delete(&self, id: ExpenseId) -> ExpenseResult<bool> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id).is_some())
    }

    fn save(&self) -> ExpenseResult<()> {
        if self.is_degraded() {
            return Err(ExpenseError::Storage(format!(
                "{} could not be read earlier; refusing to overwrite it",
                self.path.display()
            )));
        }

        let expenses = self.fetch_all()?;
        write_json_atomic(&self.path, &ExpenseData { expenses })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(!repo.is_degraded());
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let expense = Expense::new(Money::from_units(12), "Food", date(2025, 1, 15));
        let id = expense.id;

        repo.insert(expense).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount, Money::from_units(12));
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let (_temp_dir, repo) = create_test_repo();
        let mut template =
            Expense::template(Money::from_units(9), "Other", date(2025, 1, 1), Frequency::Weekly);
        template.next_due_date = Some(date(2025, 1, 8));
        repo.insert(template.clone()).unwrap();

        template.next_due_date = Some(date(2025, 1, 15));
        repo.insert(template.clone()).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(
            repo.get(template.id).unwrap().unwrap().next_due_date,
            Some(date(2025, 1, 15))
        );
    }

    #[test]
    fn test_fetch_all_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(Expense::new(Money::from_units(1), "Food", date(2025, 1, 10))).unwrap();
        repo.insert(Expense::new(Money::from_units(2), "Food", date(2025, 1, 20))).unwrap();
        repo.insert(Expense::new(Money::from_units(3), "Food", date(2025, 1, 15))).unwrap();

        let dates: Vec<_> = repo.fetch_all().unwrap().into_iter().map(|e| e.date).collect();
        assert_eq!(dates, [date(2025, 1, 20), date(2025, 1, 15), date(2025, 1, 10)]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let expense = Expense::new(Money::from_cents(4599), "Shopping", date(2025, 2, 1));
        let id = expense.id;

        repo.insert(expense).unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get(id).unwrap().unwrap().amount.cents(), 4599);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let expense = Expense::new(Money::from_units(5), "Food", date(2025, 1, 15));
        let id = expense.id;

        repo.insert(expense).unwrap();
        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_unreadable_file_falls_back_to_empty_and_blocks_save() {
        let (temp_dir, repo) = create_test_repo();
        let path = temp_dir.path().join("expenses.json");
        std::fs::write(&path, "definitely not json").unwrap();

        assert!(repo.load().is_err());
        repo.load_or_empty().unwrap();
        assert!(repo.is_degraded());
        assert!(repo.fetch_all().unwrap().is_empty());

        repo.insert(Expense::new(Money::from_units(5), "Food", date(2025, 1, 15))).unwrap();
        assert!(matches!(repo.save(), Err(ExpenseError::Storage(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "definitely not json");
    }
}
