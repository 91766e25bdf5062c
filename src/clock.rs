//! Access to the current time
//!
//! Services take a `&dyn Clock` so that rollover, reminders and the limit
//! windows can be tested against a fixed date.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Source of the current local date and time
pub trait Clock {
    /// The current local wall-clock time
    fn now(&self) -> NaiveDateTime;

    /// The current local date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// The system clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self(now)
    }

    /// Midnight at the start of `date`
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<DateTime<Local>> for FixedClock {
    fn from(dt: DateTime<Local>) -> Self {
        Self(dt.naive_local())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let clock = FixedClock::on(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.now().to_string(), "2024-02-15 00:00:00");
    }
}
