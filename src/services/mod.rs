//! Service layer for expense-cli
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, recurrence and reminder bookkeeping.

pub mod category;
pub mod expense;
pub mod recurrence;

pub use category::CategoryService;
pub use expense::{
    parse_amount, parse_date, CategorySelector, CreateExpenseInput, ExpenseFilter, ExpenseService,
    MAX_AMOUNT,
};
pub use recurrence::{next_occurrence, next_occurrence_for, rollover, RecurrenceService, RolloverPlan};
