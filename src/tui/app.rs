//! Application state for the TUI
//!
//! The App struct holds everything the dashboard needs to render and react
//! to keys. All state changes happen on the main thread.

use chrono::NaiveDate;
use ratatui::style::Color;
use tracing::warn;

use crate::clock::Clock;
use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::export;
use crate::models::{Category, Expense, Frequency, Period};
use crate::reports::{LimitsReport, SpendingReport};
use crate::services::{
    parse_amount, parse_date, CategorySelector, CreateExpenseInput, ExpenseFilter,
    ExpenseService, RecurrenceService,
};
use crate::storage::{ExpenseStore, Storage};

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Expenses,
    Recurring,
}

impl ActiveView {
    pub fn all() -> [ActiveView; 3] {
        [Self::Dashboard, Self::Expenses, Self::Recurring]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Expenses => "Expenses",
            Self::Recurring => "Recurring",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Expenses => 1,
            Self::Recurring => 2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Dashboard => Self::Expenses,
            Self::Expenses => Self::Recurring,
            Self::Recurring => Self::Dashboard,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Dashboard => Self::Recurring,
            Self::Expenses => Self::Dashboard,
            Self::Recurring => Self::Expenses,
        }
    }
}

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box
    Search,
    /// Filling in the add-expense form
    AddExpense,
    /// Waiting for y/n on a delete
    ConfirmDelete,
}

/// Single-line text input; the cursor counts characters, not bytes
#[derive(Debug, Clone, Default)]
pub struct InputField {
    value: String,
    cursor: usize,
}

impl InputField {
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Fields of the add-expense form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Amount,
    Category,
    Date,
    Frequency,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Amount => Self::Category,
            Self::Category => Self::Date,
            Self::Date => Self::Frequency,
            Self::Frequency => Self::Amount,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Amount => Self::Frequency,
            Self::Category => Self::Amount,
            Self::Date => Self::Category,
            Self::Frequency => Self::Date,
        }
    }
}

/// State of the add-expense form
#[derive(Debug, Clone)]
pub struct ExpenseForm {
    pub focused: FormField,
    pub amount: InputField,
    pub category: InputField,
    pub date: InputField,
    /// `None` adds a one-off expense
    pub frequency: Option<Frequency>,
    pub error: Option<String>,
}

impl ExpenseForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            focused: FormField::Amount,
            amount: InputField::default(),
            category: InputField::with_value("Other"),
            date: InputField::with_value(today.format("%Y-%m-%d").to_string()),
            frequency: None,
            error: None,
        }
    }

    /// The text field with focus, if the focused field takes text
    pub fn focused_input_mut(&mut self) -> Option<&mut InputField> {
        match self.focused {
            FormField::Amount => Some(&mut self.amount),
            FormField::Category => Some(&mut self.category),
            FormField::Date => Some(&mut self.date),
            FormField::Frequency => None,
        }
    }

    /// Cycle None -> Daily -> Weekly -> Monthly -> None
    pub fn cycle_frequency(&mut self) {
        self.frequency = match self.frequency {
            None => Some(Frequency::Daily),
            Some(Frequency::Daily) => Some(Frequency::Weekly),
            Some(Frequency::Weekly) => Some(Frequency::Monthly),
            Some(Frequency::Monthly) => None,
        };
    }

    pub fn frequency_label(&self) -> String {
        match self.frequency {
            Some(frequency) => frequency.to_string(),
            None => "One-off".to_string(),
        }
    }

    /// Validate the form into service input
    pub fn to_input(&self) -> ExpenseResult<CreateExpenseInput> {
        let amount = parse_amount(self.amount.value())?;
        let category = match self.category.value().trim() {
            "" => "Other".to_string(),
            name => name.to_string(),
        };
        let date = parse_date(self.date.value())?;

        Ok(CreateExpenseInput {
            amount,
            category,
            date,
            frequency: self.frequency,
        })
    }
}

/// Main application state
pub struct App<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    pub clock: &'a dyn Clock,

    pub should_quit: bool,
    pub active_view: ActiveView,
    pub input_mode: InputMode,

    /// Free-text search over categories
    pub search: InputField,
    /// Category restriction for the expense list
    pub category_filter: CategorySelector,
    /// Known categories, for cycling the filter and colouring rows
    pub categories: Vec<Category>,

    /// Selected row in the expense or recurring list
    pub selected_index: usize,

    pub form: ExpenseForm,
    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(storage: &'a Storage, settings: &'a Settings, clock: &'a dyn Clock) -> Self {
        let categories = storage.categories.get_all().unwrap_or_else(|e| {
            warn!(error = %e, "could not load categories");
            Vec::new()
        });

        Self {
            storage,
            settings,
            clock,
            should_quit: false,
            active_view: ActiveView::default(),
            input_mode: InputMode::default(),
            search: InputField::default(),
            category_filter: CategorySelector::All,
            categories,
            selected_index: 0,
            form: ExpenseForm::new(clock.today()),
            status_message: None,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        self.selected_index = 0;
    }

    fn service(&self) -> ExpenseService<'a> {
        let storage: &'a Storage = self.storage;
        ExpenseService::new(&storage.expenses, &storage.reminders, self.settings.reminder_hour)
    }

    fn all_expenses(&self) -> Vec<Expense> {
        self.storage.expenses.fetch_all().unwrap_or_else(|e| {
            warn!(error = %e, "could not read expenses");
            Vec::new()
        })
    }

    /// The filter built from the search box and category selector
    pub fn filter(&self) -> ExpenseFilter {
        ExpenseFilter::new()
            .query(self.search.value())
            .category(self.category_filter.clone())
    }

    /// Concrete expenses passing the current filter, newest first
    pub fn visible_expenses(&self) -> Vec<Expense> {
        self.filter().apply(&self.all_expenses())
    }

    /// Recurring templates, soonest due first
    pub fn templates(&self) -> Vec<Expense> {
        RecurrenceService::new(
            &self.storage.expenses,
            &self.storage.reminders,
            self.settings.reminder_hour,
        )
        .templates()
        .unwrap_or_else(|e| {
            warn!(error = %e, "could not read recurring expenses");
            Vec::new()
        })
    }

    pub fn limits_report(&self) -> LimitsReport {
        LimitsReport::generate(&self.all_expenses(), self.settings, self.clock.today())
    }

    pub fn month_report(&self) -> SpendingReport {
        SpendingReport::generate(
            &self.all_expenses(),
            Period::Month,
            self.clock.today(),
            self.settings.week_start(),
        )
    }

    /// Display colour of a category, when one is configured
    pub fn category_color(&self, name: &str) -> Option<Color> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .and_then(Category::rgb)
            .map(|(r, g, b)| Color::Rgb(r, g, b))
    }

    /// Rows in the list the active view shows
    fn current_rows(&self) -> Vec<Expense> {
        match self.active_view {
            ActiveView::Dashboard => Vec::new(),
            ActiveView::Expenses => self.visible_expenses(),
            ActiveView::Recurring => self.templates(),
        }
    }

    pub fn selected_expense(&self) -> Option<Expense> {
        self.current_rows().into_iter().nth(self.selected_index)
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.current_rows().len();
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    /// Step the category filter through All and each known category
    pub fn cycle_category(&mut self) {
        let names: Vec<&str> = self.categories.iter().map(|c| c.name.as_str()).collect();
        self.category_filter = match &self.category_filter {
            CategorySelector::All => names
                .first()
                .map(|n| CategorySelector::Named(n.to_string()))
                .unwrap_or(CategorySelector::All),
            CategorySelector::Named(current) => {
                let next = names
                    .iter()
                    .position(|n| n == current)
                    .and_then(|i| names.get(i + 1));
                match next {
                    Some(name) => CategorySelector::Named(name.to_string()),
                    None => CategorySelector::All,
                }
            }
        };
        self.selected_index = 0;
    }

    pub fn category_filter_label(&self) -> &str {
        match &self.category_filter {
            CategorySelector::All => "All",
            CategorySelector::Named(name) => name,
        }
    }

    pub fn open_form(&mut self) {
        self.form = ExpenseForm::new(self.clock.today());
        self.input_mode = InputMode::AddExpense;
    }

    pub fn close_form(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Validate and save the form; errors stay on the form
    pub fn submit_form(&mut self) {
        let result = self
            .form
            .to_input()
            .and_then(|input| self.service().create(input));

        match result {
            Ok(expense) => {
                let currency = &self.settings.currency_symbol;
                let message = if expense.is_recurring {
                    format!(
                        "Added {} recurring {}",
                        expense.amount.format_with_symbol(currency),
                        expense.category
                    )
                } else {
                    format!(
                        "Added {} for {}",
                        expense.amount.format_with_symbol(currency),
                        expense.category
                    )
                };
                self.close_form();
                self.set_status(message);
            }
            Err(e) => self.form.error = Some(e.to_string()),
        }
    }

    /// Ask for confirmation before deleting the selected row
    pub fn request_delete(&mut self) {
        if self.selected_expense().is_some() {
            self.input_mode = InputMode::ConfirmDelete;
        } else {
            self.set_status("Nothing selected");
        }
    }

    pub fn confirm_delete(&mut self) {
        self.input_mode = InputMode::Normal;
        let Some(expense) = self.selected_expense() else {
            return;
        };

        match self.service().delete(expense.id) {
            Ok(deleted) => {
                self.set_status(format!("Deleted {} {}", deleted.category, deleted.amount));
                self.move_up();
            }
            Err(e) => self.set_status(format!("Delete failed: {}", e)),
        }
    }

    /// Materialize due recurring expenses now
    pub fn run_rollover(&mut self) {
        let service = RecurrenceService::new(
            &self.storage.expenses,
            &self.storage.reminders,
            self.settings.reminder_hour,
        );
        match service.process_due(self.clock.today(), self.settings.rollover_policy) {
            Ok(plan) if plan.is_empty() => self.set_status("No recurring expenses are due"),
            Ok(plan) => self.set_status(format!("Created {} expense(s)", plan.created.len())),
            Err(e) => self.set_status(format!("Rollover failed: {}", e)),
        }
    }

    /// Export all concrete expenses to the export directory
    pub fn export_csv(&mut self) {
        let expenses = match self.service().concrete() {
            Ok(expenses) => expenses,
            Err(e) => {
                warn!(error = %e, "could not read expenses for export");
                self.set_status(format!("Export failed: {}", e));
                return;
            }
        };
        let dir = self.storage.paths().export_dir();
        match export::export_to_dir(&expenses, &dir, self.clock.now()) {
            Some(path) => self.set_status(format!("Exported to {}", path.display())),
            None => self.set_status("Export failed"),
        }
    }
}
