//! Display formatting for terminal output
//!
//! Tables and lists for the CLI commands. Reports format themselves.

pub mod category;
pub mod expense;
pub mod reminder;

pub use category::format_category_list;
pub use expense::{format_expense_details, format_expense_table, format_template_table};
pub use reminder::{format_delivered, format_reminder_list};
