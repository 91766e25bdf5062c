//! Configuration module for expense-cli
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence (limits, rollover policy, reminders)

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::{RolloverPolicy, Settings, SpendingLimits};
