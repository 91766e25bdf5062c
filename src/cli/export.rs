//! CLI command for CSV export

use std::path::PathBuf;

use clap::Args;

use crate::clock::Clock;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export;
use crate::services::ExpenseFilter;
use crate::storage::{ExpenseStore, Storage};

/// Arguments for `expense export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write to this file instead of a timestamped file in the export directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle `expense export`
pub fn handle_export(storage: &Storage, clock: &dyn Clock, args: ExportArgs) -> ExpenseResult<()> {
    let expenses = ExpenseFilter::new().apply(&storage.expenses.fetch_all()?);

    match args.output {
        Some(path) => {
            let rows = export::export_to_file(&expenses, &path)?;
            println!("Exported {} expense(s) to: {}", rows, path.display());
        }
        None => {
            let dir = storage.paths().export_dir();
            let path = export::export_to_dir(&expenses, &dir, clock.now()).ok_or_else(|| {
                ExpenseError::Export(format!("Could not write an export to {}", dir.display()))
            })?;
            println!("Exported {} expense(s) to: {}", expenses.len(), path.display());
        }
    }

    Ok(())
}
