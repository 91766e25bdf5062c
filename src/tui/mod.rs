//! Terminal dashboard
//!
//! Built with ratatui on crossterm: limit gauges, a searchable expense list,
//! recurring templates and an add-expense form.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;
pub mod views;

pub use app::App;
pub use terminal::run_tui;
