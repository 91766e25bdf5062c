//! User settings for expense-cli
//!
//! Spending limits, recurring-expense behaviour and display preferences.
//! Stored as `config.json` in the base directory; every field has a default
//! so older or hand-edited files keep loading.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::{Money, Period};

/// How many overdue occurrences a template produces per rollover run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RolloverPolicy {
    /// At most one occurrence per template per run
    OneShot,
    /// Every overdue occurrence, until the next due date is in the future
    #[default]
    CatchUp,
}

impl RolloverPolicy {
    /// Parse a policy name ("one-shot", "catch-up")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "one-shot" | "oneshot" | "once" => Some(Self::OneShot),
            "catch-up" | "catchup" | "all" => Some(Self::CatchUp),
            _ => None,
        }
    }
}

impl std::fmt::Display for RolloverPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneShot => write!(f, "one-shot"),
            Self::CatchUp => write!(f, "catch-up"),
        }
    }
}

/// Daily, weekly and monthly spending limits
///
/// A limit of zero means "not set".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingLimits {
    #[serde(default = "default_daily_limit")]
    pub daily: Money,
    #[serde(default = "default_weekly_limit")]
    pub weekly: Money,
    #[serde(default = "default_monthly_limit")]
    pub monthly: Money,
}

fn default_daily_limit() -> Money {
    Money::from_units(100)
}

fn default_weekly_limit() -> Money {
    Money::from_units(500)
}

fn default_monthly_limit() -> Money {
    Money::from_units(2000)
}

impl Default for SpendingLimits {
    fn default() -> Self {
        Self {
            daily: default_daily_limit(),
            weekly: default_weekly_limit(),
            monthly: default_monthly_limit(),
        }
    }
}

/// User settings for expense-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Spending limits shown on the dashboard
    #[serde(default)]
    pub limits: SpendingLimits,

    /// How overdue recurring expenses are materialized
    #[serde(default)]
    pub rollover_policy: RolloverPolicy,

    /// Process due recurring expenses every time the CLI starts
    #[serde(default = "default_true")]
    pub auto_rollover: bool,

    /// Hour of the due date at which reminders fire (0-23)
    #[serde(default = "default_reminder_hour")]
    pub reminder_hour: u32,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for list output (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// First day of week (0 = Sunday, 1 = Monday)
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: u8,
}

fn default_schema_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_reminder_hour() -> u32 {
    9
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_first_day_of_week() -> u8 {
    1 // Monday, ISO 8601
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            limits: SpendingLimits::default(),
            rollover_policy: RolloverPolicy::default(),
            auto_rollover: default_true(),
            reminder_hour: default_reminder_hour(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            first_day_of_week: default_first_day_of_week(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            debug!(path = %settings_path.display(), "no settings file, using defaults");
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The limit for a period
    pub fn limit(&self, period: Period) -> Money {
        match period {
            Period::Day => self.limits.daily,
            Period::Week => self.limits.weekly,
            Period::Month => self.limits.monthly,
        }
    }

    /// Change the limit for a period (zero clears it)
    pub fn set_limit(&mut self, period: Period, amount: Money) -> Result<(), ExpenseError> {
        if amount.is_negative() {
            return Err(ExpenseError::Validation(
                "Limits cannot be negative".to_string(),
            ));
        }

        match period {
            Period::Day => self.limits.daily = amount,
            Period::Week => self.limits.weekly = amount,
            Period::Month => self.limits.monthly = amount,
        }
        Ok(())
    }

    /// First day of the week as a chrono weekday
    pub fn week_start(&self) -> Weekday {
        let mut day = Weekday::Sun;
        for _ in 0..(self.first_day_of_week % 7) {
            day = day.succ();
        }
        day
    }

    /// Check and normalize values that serde cannot constrain
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.reminder_hour > 23 {
            return Err(ExpenseError::Config(format!(
                "reminder_hour must be 0-23, got {}",
                self.reminder_hour
            )));
        }
        if self.first_day_of_week > 6 {
            return Err(ExpenseError::Config(format!(
                "first_day_of_week must be 0-6, got {}",
                self.first_day_of_week
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_limits() {
        let settings = Settings::default();
        assert_eq!(settings.limit(Period::Day), Money::from_units(100));
        assert_eq!(settings.limit(Period::Week), Money::from_units(500));
        assert_eq!(settings.limit(Period::Month), Money::from_units(2000));
    }

    #[test]
    fn test_first_run_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.limits, SpendingLimits::default());
        assert_eq!(settings.rollover_policy, RolloverPolicy::CatchUp);
        assert!(settings.auto_rollover);
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.set_limit(Period::Week, Money::from_units(350)).unwrap();
        settings.rollover_policy = RolloverPolicy::OneShot;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.limit(Period::Week), Money::from_units(350));
        assert_eq!(loaded.limit(Period::Day), Money::from_units(100));
        assert_eq!(loaded.rollover_policy, RolloverPolicy::OneShot);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"limits": {"daily": 2500}}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.limit(Period::Day), Money::from_cents(2500));
        assert_eq!(loaded.limit(Period::Month), Money::from_units(2000));
        assert_eq!(loaded.reminder_hour, 9);
    }

    #[test]
    fn test_negative_limit_rejected() {
        let mut settings = Settings::default();
        let err = settings.set_limit(Period::Day, Money::from_cents(-1)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(settings.limit(Period::Day), Money::from_units(100));
    }

    #[test]
    fn test_week_start() {
        let mut settings = Settings::default();
        assert_eq!(settings.week_start(), Weekday::Mon);
        settings.first_day_of_week = 0;
        assert_eq!(settings.week_start(), Weekday::Sun);
    }

    #[test]
    fn test_rollover_policy_parse() {
        assert_eq!(RolloverPolicy::parse("one-shot"), Some(RolloverPolicy::OneShot));
        assert_eq!(RolloverPolicy::parse("catch_up"), Some(RolloverPolicy::CatchUp));
        assert_eq!(RolloverPolicy::parse("sometimes"), None);
        let json = serde_json::to_string(&RolloverPolicy::OneShot).unwrap();
        assert_eq!(json, "\"one-shot\"");
    }

    #[test]
    fn test_validate() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());
        settings.reminder_hour = 24;
        assert!(settings.validate().is_err());
    }
}
