//! Category display formatting

use crate::models::Category;

/// Format categories as a simple list
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'expense init' to create default categories.\n"
            .to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "    {:<name_width$}  {:<7}  {}\n",
        "Name",
        "Color",
        "ID",
        name_width = name_width
    ));

    for category in categories {
        let symbol = if category.symbol.is_empty() {
            "  "
        } else {
            category.symbol.as_str()
        };
        output.push_str(&format!(
            "{:<2}  {:<name_width$}  {:<7}  {}\n",
            symbol,
            category.name,
            category.color,
            category.id,
            name_width = name_width
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_categories;

    #[test]
    fn test_empty_list() {
        assert!(format_category_list(&[]).contains("expense init"));
    }

    #[test]
    fn test_list_contains_every_category() {
        let categories = default_categories();
        let output = format_category_list(&categories);
        for category in &categories {
            assert!(output.contains(&category.name));
            assert!(output.contains(&category.color));
        }
    }
}
