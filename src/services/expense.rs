//! Expense service
//!
//! Adding, finding, filtering and deleting expenses. Input is validated here,
//! before anything reaches the store.

use chrono::NaiveDate;
use tracing::{debug, error};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId, Frequency, Money};
use crate::notify::{Notifier, Reminder};
use crate::storage::ExpenseStore;

use super::recurrence::next_occurrence;

/// Message shown for any amount that is not a positive number
pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid amount greater than 0.";

/// Largest amount a single expense may have
pub const MAX_AMOUNT: Money = Money::from_units(1_000_000_000);

/// Parse an amount typed by the user
///
/// Rejects anything that is not a number, zero or negative amounts, and
/// amounts above [`MAX_AMOUNT`].
pub fn parse_amount(input: &str) -> ExpenseResult<Money> {
    match Money::parse(input) {
        Ok(amount) if amount.is_positive() && amount <= MAX_AMOUNT => Ok(amount),
        _ => Err(ExpenseError::Validation(INVALID_AMOUNT_MESSAGE.into())),
    }
}

/// Parse a date typed by the user
pub fn parse_date(input: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", input.trim()))
    })
}

/// Which categories a filter accepts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategorySelector {
    #[default]
    All,
    Named(String),
}

impl CategorySelector {
    /// "All" (any case) selects everything; anything else names a category
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(s.to_string())
        }
    }

    pub fn accepts(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Case-insensitive substring matched against the category
    pub query: String,
    /// Category restriction
    pub category: CategorySelector,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by search text
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Filter by category
    pub fn category(mut self, category: CategorySelector) -> Self {
        self.category = category;
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a single expense passes the filter
    ///
    /// Templates never match.
    pub fn matches(&self, expense: &Expense) -> bool {
        if !expense.is_concrete() {
            return false;
        }

        let query = self.query.trim();
        let query_matches =
            query.is_empty() || expense.category.to_lowercase().contains(&query.to_lowercase());

        query_matches && self.category.accepts(&expense.category)
    }

    /// Apply the filter, newest date first
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        let mut result: Vec<_> = expenses.iter().filter(|e| self.matches(e)).cloned().collect();
        result.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        if let Some(limit) = self.limit {
            result.truncate(limit);
        }
        result
    }
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    /// Set to create a recurring template instead of a concrete expense
    pub frequency: Option<Frequency>,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    store: &'a dyn ExpenseStore,
    notifier: &'a dyn Notifier,
    reminder_hour: u32,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(store: &'a dyn ExpenseStore, notifier: &'a dyn Notifier, reminder_hour: u32) -> Self {
        Self {
            store,
            notifier,
            reminder_hour,
        }
    }

    /// Add an expense
    ///
    /// With a frequency this creates only the recurring template, first due
    /// one period after `date`, and schedules its reminder.
    pub fn create(&self, input: CreateExpenseInput) -> ExpenseResult<Expense> {
        if !input.amount.is_positive() || input.amount > MAX_AMOUNT {
            return Err(ExpenseError::Validation(INVALID_AMOUNT_MESSAGE.into()));
        }

        let category = input.category.trim();
        let expense = match input.frequency {
            Some(frequency) => {
                let mut template =
                    Expense::template(input.amount, category, input.date, frequency);
                template.next_due_date = Some(next_occurrence(input.date, frequency).ok_or_else(
                    || ExpenseError::Validation(format!("No {} date after {}", frequency, input.date)),
                )?);
                template
            }
            None => Expense::new(input.amount, category, input.date),
        };

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.store.insert(expense.clone())?;
        if let Err(e) = self.store.save() {
            error!(error = %e, id = %expense.id, "failed to save new expense");
            return Err(e);
        }

        if let Some(reminder) = Reminder::for_template(&expense, self.reminder_hour) {
            self.notifier.schedule(reminder);
        }

        debug!(id = %expense.id, recurring = expense.is_recurring, "added expense");
        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.store.get(id)
    }

    /// Find an expense by full UUID or by its short display id ("exp-1a2b3c4d")
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Expense>> {
        if let Ok(id) = identifier.trim().parse::<ExpenseId>() {
            return self.store.get(id);
        }

        let mut matches = self
            .store
            .fetch_all()?
            .into_iter()
            .filter(|e| e.id.matches_short(identifier));

        match (matches.next(), matches.next()) {
            (Some(expense), None) => Ok(Some(expense)),
            (None, _) => Ok(None),
            (Some(_), Some(_)) => Err(ExpenseError::Validation(format!(
                "'{}' matches more than one expense; use a longer id",
                identifier.trim()
            ))),
        }
    }

    /// Concrete expenses passing the filter, newest first
    pub fn list(&self, filter: &ExpenseFilter) -> ExpenseResult<Vec<Expense>> {
        Ok(filter.apply(&self.store.fetch_all()?))
    }

    /// All concrete expenses, newest first
    pub fn concrete(&self) -> ExpenseResult<Vec<Expense>> {
        self.list(&ExpenseFilter::new())
    }

    /// Delete an expense; deleting a template also cancels its reminder
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let expense = self
            .store
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        self.store.delete(id)?;
        if let Err(e) = self.store.save() {
            error!(error = %e, %id, "failed to save after delete");
            return Err(e);
        }

        if expense.is_recurring {
            self.notifier.cancel(id);
        }

        debug!(%id, "deleted expense");
        Ok(expense)
    }
}
