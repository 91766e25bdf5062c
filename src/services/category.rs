//! Category service
//!
//! Categories are labels only; removing one leaves expenses that use its
//! name untouched.

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryId};
use crate::storage::CategoryRepository;

/// Service for category management
pub struct CategoryService<'a> {
    categories: &'a CategoryRepository,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(categories: &'a CategoryRepository) -> Self {
        Self { categories }
    }

    /// Create a new category
    pub fn create(&self, name: &str, symbol: &str, color: &str) -> ExpenseResult<Category> {
        let name = name.trim();

        if self.categories.get_by_name(name)?.is_some() {
            return Err(ExpenseError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let category = Category::new(name, symbol.trim(), color.trim().to_lowercase());
        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.categories.upsert(category.clone())?;
        self.categories.save()?;

        Ok(category)
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Category>> {
        if let Some(category) = self.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.trim().parse::<CategoryId>() {
            return self.categories.get(id);
        }

        Ok(None)
    }

    /// List all categories
    pub fn list(&self) -> ExpenseResult<Vec<Category>> {
        self.categories.get_all()
    }

    /// Category names, for pickers and completion
    pub fn names(&self) -> ExpenseResult<Vec<String>> {
        Ok(self.list()?.into_iter().map(|c| c.name).collect())
    }

    /// Delete a category
    pub fn delete(&self, identifier: &str) -> ExpenseResult<Category> {
        let category = self
            .find(identifier)?
            .ok_or_else(|| ExpenseError::category_not_found(identifier.trim()))?;

        self.categories.delete(category.id)?;
        self.categories.save()?;

        Ok(category)
    }
}
