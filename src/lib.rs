//! expense-cli - Terminal expense tracker
//!
//! Records one-off and recurring expenses, compares spending with daily,
//! weekly and monthly limits, reminds you when recurring expenses come due,
//! and exports to CSV. Everything is stored as JSON files in a local data
//! directory.
//!
//! # Architecture
//!
//! - `config`: paths and user settings (limits, rollover policy, reminders)
//! - `error`: custom error types
//! - `models`: expenses, categories, money, frequencies and periods
//! - `storage`: JSON file storage behind the `ExpenseStore` trait
//! - `services`: adding, filtering and rolling over expenses
//! - `notify`: reminder scheduling behind the `Notifier` trait
//! - `reports`: spend-vs-limit and by-category reports
//! - `export`: CSV export
//! - `cli`, `display`, `tui`: the command line and the dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_cli::config::{ExpensePaths, Settings};
//! use expense_cli::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod notify;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{ExpenseError, ExpenseResult};
