//! Export module for expense-cli
//!
//! CSV export of concrete expenses, for spreadsheets.

pub mod csv;

pub use self::csv::{export_file_name, export_to_dir, export_to_file, write_csv, CSV_HEADER};
