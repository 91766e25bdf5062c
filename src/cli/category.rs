//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::ExpenseResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Symbol shown next to the name
        #[arg(short, long, default_value = "")]
        symbol: String,
        /// Display color (#rrggbb)
        #[arg(long, default_value = "")]
        color: String,
    },

    /// Remove a category (expenses keep their category name)
    #[command(alias = "delete")]
    Remove {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> ExpenseResult<()> {
    let service = CategoryService::new(&storage.categories);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Add {
            name,
            symbol,
            color,
        } => {
            let category = service.create(&name, &symbol, &color)?;
            println!("Created category: {}", category);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Remove { category } => {
            let removed = service.delete(&category)?;
            println!("Removed category: {}", removed.name);
        }
    }

    Ok(())
}
