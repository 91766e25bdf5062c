//! Core data models for expense-cli
//!
//! Plain serde records with explicit identity fields: expenses (concrete and
//! recurring templates), categories, and the money type they share.

pub mod category;
pub mod expense;
pub mod frequency;
pub mod ids;
pub mod money;
pub mod period;

pub use category::{default_categories, Category, CategoryValidationError};
pub use expense::{Expense, ExpenseValidationError};
pub use frequency::Frequency;
pub use ids::{CategoryId, ExpenseId};
pub use money::{Money, MoneyParseError};
pub use period::{DateWindow, Period};
