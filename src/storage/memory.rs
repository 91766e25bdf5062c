//! In-memory expense store
//!
//! Used by the service tests and by anything that wants to run the core
//! logic without touching the filesystem.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId};

use super::expenses::{sort_newest_first, ExpenseStore};

/// Expense store that keeps everything in memory
#[derive(Default)]
pub struct MemoryExpenseStore {
    data: RwLock<HashMap<ExpenseId, Expense>>,
    writes: AtomicUsize,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_expenses(expenses: impl IntoIterator<Item = Expense>) -> Self {
        let store = Self::new();
        if let Ok(mut data) = store.data.write() {
            for expense in expenses {
                data.insert(expense.id, expense);
            }
        }
        store
    }

    /// Make every subsequent `save` fail
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of `insert` and `delete` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of successful `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl ExpenseStore for MemoryExpenseStore {
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

        self.writes.fetch_add(1, Ordering::SeqCst);
        data.insert(expense.id, expense);
        Ok(())
    }

    fn delete(&self, id: ExpenseId) -> ExpenseResult<bool> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(data.remove(&id).is_some())
    }

    fn save(&self) -> ExpenseResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(ExpenseError::Storage("save failed".into()));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_counts_writes_and_saves() {
        let store = MemoryExpenseStore::new();
        let expense = Expense::new(
            Money::from_units(3),
            "Food",
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        );
        let id = expense.id;

        store.insert(expense).unwrap();
        store.save().unwrap();
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.save_count(), 1);

        store.delete(id).unwrap();
        assert_eq!(store.write_count(), 2);
        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_failing_saves() {
        let store = MemoryExpenseStore::new();
        store.fail_saves(true);
        assert!(store.save().is_err());
        assert_eq!(store.save_count(), 0);
    }
}
