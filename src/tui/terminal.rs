//! Terminal setup and teardown
//!
//! Raw mode and the alternate screen are undone on exit and, through a panic
//! hook, on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::clock::Clock;
use crate::config::Settings;
use crate::error::ExpenseError;
use crate::storage::Storage;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the dashboard until the user quits
pub fn run_tui(storage: &Storage, settings: &Settings, clock: &dyn Clock) -> Result<()> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, App::new(storage, settings, clock));
    restore_terminal()?;
    result
}

fn event_loop(terminal: &mut Tui, mut app: App<'_>) -> Result<()> {
    let events = EventHandler::default();

    while !app.should_quit {
        terminal.draw(|frame| super::views::render(frame, &app))?;

        let event = events
            .next()
            .map_err(|_| ExpenseError::Tui("terminal event thread stopped".into()))?;
        // resizes and ticks only trigger the redraw above
        handle_event(&mut app, event);
    }

    Ok(())
}
