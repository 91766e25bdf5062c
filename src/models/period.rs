//! Reporting periods for spending limits
//!
//! Each period is anchored at the current day: "today", "this week" and
//! "this month" all end on today and start at the period boundary.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A limit/aggregation period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    /// All periods, shortest first
    pub fn all() -> [Period; 3] {
        [Period::Day, Period::Week, Period::Month]
    }

    /// Parse a period name ("daily", "day", "today", "weekly", ...)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" | "today" => Some(Self::Day),
            "week" | "weekly" => Some(Self::Week),
            "month" | "monthly" => Some(Self::Month),
            _ => None,
        }
    }

    /// Heading used on dashboards
    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
        }
    }

    /// Name of the matching limit setting
    pub fn limit_name(&self) -> &'static str {
        match self {
            Self::Day => "Daily",
            Self::Week => "Weekly",
            Self::Month => "Monthly",
        }
    }

    /// First day of the period containing `today`
    pub fn start(&self, today: NaiveDate, week_start: Weekday) -> NaiveDate {
        match self {
            Self::Day => today,
            Self::Week => {
                let offset = (today.weekday().num_days_from_monday() + 7
                    - week_start.num_days_from_monday())
                    % 7;
                today - Duration::days(offset as i64)
            }
            Self::Month => today.with_day(1).unwrap_or(today),
        }
    }

    /// The window `[start, today]` for this period
    pub fn window(&self, today: NaiveDate, week_start: Weekday) -> DateWindow {
        DateWindow {
            start: self.start(today, week_start),
            end: today,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
