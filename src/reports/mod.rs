//! Reports module for expense-cli
//!
//! Spend-vs-limit summaries and spending breakdowns by category. Reports are
//! pure functions of the expense list, the settings and today's date.

pub mod limits;
pub mod spending;

pub use limits::{period_total, LimitLevel, LimitRow, LimitsReport};
pub use spending::{SpendingByCategory, SpendingReport};
