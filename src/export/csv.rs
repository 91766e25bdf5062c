//! CSV Export functionality
//!
//! Writes concrete expenses as `Date,Category,Amount` rows. Dates use the
//! short calendar form ("Jan 1, 2024") and amounts are plain decimals
//! ("50.00"). Quoting is left to the csv writer.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{error, info};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

/// Header row of every export
pub const CSV_HEADER: [&str; 3] = ["Date", "Category", "Amount"];

/// Date as written to the export ("Jan 1, 2024")
pub fn format_export_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// File name for an export taken at `now`
pub fn export_file_name(now: NaiveDateTime) -> String {
    format!("expenses-{}.csv", now.format("%Y-%m-%d_%H%M%S"))
}

/// Write concrete expenses as CSV, returning the number of rows written
///
/// Recurring templates are skipped.
pub fn write_csv<W: Write>(expenses: &[Expense], writer: W) -> ExpenseResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    let mut rows = 0;
    for expense in expenses.iter().filter(|e| e.is_concrete()) {
        csv_writer.write_record([
            format_export_date(expense.date),
            expense.category.clone(),
            expense.amount.to_decimal_string(),
        ])?;
        rows += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(rows)
}

/// Write the export to an explicit path
pub fn export_to_file(expenses: &[Expense], path: &Path) -> ExpenseResult<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| ExpenseError::Export(format!("Failed to create {}: {}", parent.display(), e)))?;
    }

    let file = File::create(path)
        .map_err(|e| ExpenseError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    let rows = write_csv(expenses, file)?;

    info!(rows, path = %path.display(), "exported expenses");
    Ok(rows)
}

/// Write a timestamped export into `dir`
///
/// Returns the path of the new file, or `None` if it could not be written.
/// The failure is logged.
pub fn export_to_dir(expenses: &[Expense], dir: &Path, now: NaiveDateTime) -> Option<PathBuf> {
    let path = dir.join(export_file_name(now));

    match export_to_file(expenses, &path) {
        Ok(_) => Some(path),
        Err(e) => {
            error!(error = %e, dir = %dir.display(), "export failed");
            None
        }
    }
}
