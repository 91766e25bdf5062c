//! Storage initialization
//!
//! Handles first-run setup and default data creation

use tracing::info;

use crate::config::paths::ExpensePaths;
use crate::config::settings::Settings;
use crate::error::ExpenseError;
use crate::models::default_categories;

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the directories, a default settings file and the default
/// categories. Existing files are left alone.
pub fn initialize_storage(paths: &ExpensePaths) -> Result<(), ExpenseError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    if !paths.categories_file().exists() {
        let data = CategoryData {
            categories: default_categories(),
        };
        write_json_atomic(paths.categories_file(), &data)?;
        info!(count = data.categories.len(), "created default categories");
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &ExpensePaths) -> bool {
    !paths.categories_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));

        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.settings_file().exists());
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_default_categories_created() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();

        let content = std::fs::read_to_string(paths.categories_file()).unwrap();
        let data: CategoryData = serde_json::from_str(&content).unwrap();

        let names: Vec<_> = data.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Food", "Transport", "Entertainment", "Shopping", "Other"]);
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();

        let custom_data = CategoryData {
            categories: vec![Category::new("Pets", "", "")],
        };
        write_json_atomic(paths.categories_file(), &custom_data).unwrap();

        initialize_storage(&paths).unwrap();

        let content = std::fs::read_to_string(paths.categories_file()).unwrap();
        let data: CategoryData = serde_json::from_str(&content).unwrap();
        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.categories[0].name, "Pets");
    }
}
