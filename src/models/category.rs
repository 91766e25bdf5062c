//! Category model
//!
//! Categories give expenses a label plus a symbol and color for display.
//! Expenses refer to categories by name; nothing enforces that the name exists.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// An expense category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name, matched against `Expense::category`
    pub name: String,

    /// Short symbol shown next to the name
    #[serde(default)]
    pub symbol: String,

    /// Display color as a hex string ("#34c759")
    #[serde(default)]
    pub color: String,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            symbol: symbol.into(),
            color: color.into(),
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if !self.color.is_empty() && !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }

    /// Parse the hex color into RGB components
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        if !is_hex_color(&self.color) {
            return None;
        }
        let hex = &self.color[1..];
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbol.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.symbol, self.name)
        }
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Categories created on first run
pub fn default_categories() -> Vec<Category> {
    [
        ("Food", "🍔", "#ff9500"),
        ("Transport", "🚌", "#007aff"),
        ("Entertainment", "🎬", "#af52de"),
        ("Shopping", "🛍", "#ff2d55"),
        ("Other", "📦", "#8e8e93"),
    ]
    .into_iter()
    .map(|(name, symbol, color)| Category::new(name, symbol, color))
    .collect()
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(c) => write!(f, "Invalid color '{}', expected #rrggbb", c),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let defaults = default_categories();
        let names: Vec<_> = defaults.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Food", "Transport", "Entertainment", "Shopping", "Other"]);
        assert!(defaults.iter().all(|c| c.validate().is_ok()));
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Category::new("", "", "").validate(),
            Err(CategoryValidationError::EmptyName)
        );
        assert!(matches!(
            Category::new("x".repeat(51), "", "").validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));
        assert!(matches!(
            Category::new("Pets", "", "green").validate(),
            Err(CategoryValidationError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_rgb() {
        let cat = Category::new("Food", "", "#ff9500");
        assert_eq!(cat.rgb(), Some((255, 149, 0)));
        assert_eq!(Category::new("Food", "", "").rgb(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Category::new("Food", "🍔", "").to_string(), "🍔 Food");
        assert_eq!(Category::new("Food", "", "").to_string(), "Food");
    }
}
