//! Recurrence frequency for template expenses

use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a recurring expense comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// All frequencies in display order
    pub fn all() -> &'static [Frequency] {
        &[Frequency::Daily, Frequency::Weekly, Frequency::Monthly]
    }

    /// Parse a frequency name, case-insensitively
    ///
    /// Returns `None` for anything that is not daily, weekly or monthly.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Some(Self::Daily),
            "weekly" | "week" => Some(Self::Weekly),
            "monthly" | "month" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// Lowercase adjective used in reminder text ("monthly")
    pub fn adjective(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
        }
    }
}
