//! Path management for expense-cli
//!
//! ## Path Resolution Order
//!
//! 1. `EXPENSE_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/expense-cli` on Linux, `~/Library/Application Support/expense-cli`
//!    on macOS, `%APPDATA%\expense-cli` on Windows)

use std::path::PathBuf;

use directories::{ProjectDirs, UserDirs};

use crate::error::ExpenseError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "EXPENSE_CLI_DATA_DIR";

/// Manages all paths used by expense-cli
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    /// Base directory for all expense-cli data
    base_dir: PathBuf,
}

impl ExpensePaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ExpenseError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "expense-cli")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    ExpenseError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the JSON data files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Path to categories.json
    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    /// Path to reminders.json (pending due-date reminders)
    pub fn reminders_file(&self) -> PathBuf {
        self.data_dir().join("reminders.json")
    }

    /// Where CSV exports go by default
    ///
    /// The user's documents directory when the platform has one, otherwise
    /// an `exports` directory next to the data.
    pub fn export_dir(&self) -> PathBuf {
        if std::env::var_os(DATA_DIR_ENV).is_none() {
            if let Some(documents) = UserDirs::new().and_then(|u| u.document_dir().map(PathBuf::from)) {
                return documents;
            }
        }
        self.base_dir.join("exports")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), ExpenseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExpenseError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| ExpenseError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if expense-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.expenses_file(),
            temp_dir.path().join("data").join("expenses.json")
        );
        assert_eq!(
            paths.reminders_file(),
            temp_dir.path().join("data").join("reminders.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().join("nested"));

        assert!(!paths.is_initialized());
        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
    }
}
