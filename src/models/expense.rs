//! Expense model
//!
//! A single record type covers both concrete expenses (dated transactions the
//! user paid) and recurring templates (rules that spawn concrete expenses when
//! they come due).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::frequency::Frequency;
use super::ids::ExpenseId;
use super::money::Money;

/// An expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Amount spent (always positive for records created through the service)
    pub amount: Money,

    /// Category name
    pub category: String,

    /// Date of the expense; for templates, the date of the first occurrence
    pub date: NaiveDate,

    /// Whether this record is a recurring template
    #[serde(default)]
    pub is_recurring: bool,

    /// Recurrence frequency (templates only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,

    /// Next date this template comes due (templates only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDate>,

    /// Template that produced this expense during rollover
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<ExpenseId>,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a concrete (non-recurring) expense
    pub fn new(amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            category: category.into(),
            date,
            is_recurring: false,
            frequency: None,
            next_due_date: None,
            template_id: None,
            created_at: Utc::now(),
        }
    }

    /// Create a recurring template
    ///
    /// `next_due_date` is left for the caller to compute from `date`.
    pub fn template(
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
        frequency: Frequency,
    ) -> Self {
        let mut expense = Self::new(amount, category, date);
        expense.is_recurring = true;
        expense.frequency = Some(frequency);
        expense
    }

    /// Materialize one occurrence of this template, dated at `due`
    pub fn occurrence(&self, due: NaiveDate) -> Self {
        let mut expense = Self::new(self.amount, self.category.clone(), due);
        expense.template_id = Some(self.id);
        expense
    }

    /// Check if this is a concrete transaction (not a template)
    pub fn is_concrete(&self) -> bool {
        !self.is_recurring
    }

    /// Check if this template is due on or before `today`
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.is_recurring && self.next_due_date.is_some_and(|due| due <= today)
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        if self.is_recurring && self.frequency.is_none() {
            return Err(ExpenseValidationError::MissingFrequency);
        }

        if !self.is_recurring && (self.frequency.is_some() || self.next_due_date.is_some()) {
            return Err(ExpenseValidationError::ScheduleOnConcrete);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.category, self.amount)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
    EmptyCategory,
    MissingFrequency,
    ScheduleOnConcrete,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Please enter a valid amount greater than 0."),
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
            Self::MissingFrequency => write!(f, "Recurring expenses need a frequency"),
            Self::ScheduleOnConcrete => {
                write!(f, "Only recurring expenses can have a frequency or due date")
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_concrete() {
        let expense = Expense::new(Money::from_units(12), "Food", date(2025, 3, 1));
        assert!(expense.is_concrete());
        assert!(expense.frequency.is_none());
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_occurrence_copies_amount_and_category() {
        let mut template =
            Expense::template(Money::from_units(50), "Food", date(2023, 12, 1), Frequency::Monthly);
        template.next_due_date = Some(date(2024, 1, 1));

        let occurrence = template.occurrence(date(2024, 1, 1));
        assert!(occurrence.is_concrete());
        assert_eq!(occurrence.amount, template.amount);
        assert_eq!(occurrence.category, "Food");
        assert_eq!(occurrence.date, date(2024, 1, 1));
        assert_eq!(occurrence.template_id, Some(template.id));
        assert_ne!(occurrence.id, template.id);
    }

    #[test]
    fn test_is_due() {
        let mut template =
            Expense::template(Money::from_units(5), "Transport", date(2024, 1, 1), Frequency::Daily);
        assert!(!template.is_due(date(2024, 1, 5)));

        template.next_due_date = Some(date(2024, 1, 2));
        assert!(template.is_due(date(2024, 1, 2)));
        assert!(template.is_due(date(2024, 1, 5)));
        assert!(!template.is_due(date(2024, 1, 1)));
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::new(Money::from_cents(-500), "Food", date(2025, 1, 1));
        assert_eq!(expense.validate(), Err(ExpenseValidationError::NonPositiveAmount));

        expense.amount = Money::from_units(5);
        expense.category = "  ".into();
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyCategory));

        expense.category = "Food".into();
        expense.is_recurring = true;
        assert_eq!(expense.validate(), Err(ExpenseValidationError::MissingFrequency));

        expense.is_recurring = false;
        expense.next_due_date = Some(date(2025, 2, 1));
        assert_eq!(expense.validate(), Err(ExpenseValidationError::ScheduleOnConcrete));
    }

    #[test]
    fn test_serialization_skips_empty_schedule() {
        let expense = Expense::new(Money::from_units(3), "Other", date(2025, 1, 1));
        let json = serde_json::to_string(&expense).unwrap();
        assert!(!json.contains("next_due_date"));
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expense);
    }
}
