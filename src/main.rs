use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use expense_cli::cli::{
    handle_add, handle_category_command, handle_delete, handle_export, handle_limits_command,
    handle_list, handle_recurring_command, handle_reminders, handle_report, handle_summary,
    print_delivered, process_startup, AddArgs, CategoryCommands, ExportArgs, LimitsCommands,
    ListArgs, RecurringCommands,
};
use expense_cli::clock::SystemClock;
use expense_cli::config::{ExpensePaths, Settings};
use expense_cli::logging;
use expense_cli::models::Period;
use expense_cli::storage::{init, Storage};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal expense tracker",
    long_about = "Track one-off and recurring expenses from the terminal, keep an eye \
                  on daily, weekly and monthly spending limits, and export everything \
                  to CSV."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, settings and default categories
    Init,

    /// Add an expense
    Add(AddArgs),

    /// List and search expenses
    #[command(alias = "ls")]
    List(ListArgs),

    /// Delete an expense or recurring expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID (full or short)
        id: String,
    },

    /// Spending today, this week and this month against your limits
    Summary,

    /// Spending by category
    Report {
        /// day, week or month
        #[arg(short, long, default_value = "month")]
        period: String,
    },

    /// Show or change spending limits
    #[command(subcommand)]
    Limits(LimitsCommands),

    /// Recurring expenses
    #[command(subcommand)]
    Recurring(RecurringCommands),

    /// Category management
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Show scheduled reminders
    Reminders,

    /// Export expenses to CSV
    Export(ExportArgs),

    /// Show current configuration and paths
    Config,

    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    settings.validate()?;

    if let Some(Commands::Init) = cli.command {
        let fresh = init::needs_initialization(&paths);
        init::initialize_storage(&paths)?;
        if fresh {
            println!("Initialized expense data at: {}", paths.data_dir().display());
            println!();
            println!("Default categories: Food, Transport, Entertainment, Shopping, Other");
            println!("Default limits: daily 100.00, weekly 500.00, monthly 2000.00");
            println!();
            println!("Run 'expense add 12.50 -c Food' to record your first expense.");
        } else {
            println!("Already initialized at: {}", paths.data_dir().display());
        }
        return Ok(());
    }

    if init::needs_initialization(&paths) {
        init::initialize_storage(&paths)?;
    }

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let clock = SystemClock;

    let command = match cli.command {
        Some(Commands::Config) => {
            print_config(&paths, &settings);
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("expense - terminal expense tracker");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense tui' to launch the dashboard.");
            return Ok(());
        }
    };

    let delivered = process_startup(&storage, &settings, &clock);

    match command {
        Commands::Tui => {
            expense_cli::tui::run_tui(&storage, &settings, &clock)?;
            print_delivered(&delivered);
        }
        command => {
            print_delivered(&delivered);
            run_command(command, &storage, &mut settings, &paths, &clock)?;
        }
    }

    Ok(())
}

fn run_command(
    command: Commands,
    storage: &Storage,
    settings: &mut Settings,
    paths: &ExpensePaths,
    clock: &SystemClock,
) -> Result<()> {
    match command {
        Commands::Add(args) => handle_add(storage, settings, clock, args)?,
        Commands::List(args) => handle_list(storage, settings, args)?,
        Commands::Delete { id } => handle_delete(storage, settings, &id)?,
        Commands::Summary => handle_summary(storage, settings, clock)?,
        Commands::Report { period } => handle_report(storage, settings, clock, &period)?,
        Commands::Limits(cmd) => handle_limits_command(paths, settings, cmd)?,
        Commands::Recurring(cmd) => handle_recurring_command(storage, settings, clock, cmd)?,
        Commands::Category(cmd) => handle_category_command(storage, cmd)?,
        Commands::Reminders => handle_reminders(storage)?,
        Commands::Export(args) => handle_export(storage, clock, args)?,
        Commands::Init | Commands::Config | Commands::Tui => {}
    }
    Ok(())
}

fn print_config(paths: &ExpensePaths, settings: &Settings) {
    println!("expense configuration");
    println!("=====================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Export directory: {}", paths.export_dir().display());
    println!();
    println!("Settings:");
    for period in Period::all() {
        println!(
            "  {:<8} limit:  {}",
            period.limit_name(),
            settings.limit(period).format_with_symbol(&settings.currency_symbol)
        );
    }
    println!("  Rollover policy:  {}", settings.rollover_policy);
    println!("  Auto rollover:    {}", settings.auto_rollover);
    println!("  Reminder hour:    {:02}:00", settings.reminder_hour);
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  Date format:      {}", settings.date_format);
}
