//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod expense;
pub mod export;
pub mod limits;
pub mod recurring;
pub mod startup;

pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_add, handle_delete, handle_list, AddArgs, ListArgs};
pub use export::{handle_export, ExportArgs};
pub use limits::{handle_limits_command, handle_report, handle_summary, LimitsCommands};
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use startup::{handle_reminders, print_delivered, process_startup};
