//! Key handling for the TUI
//!
//! Routes key presses to the handler for the current input mode. Failures
//! end up in the status bar or on the form, never as an error out of the loop.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveView, App, FormField, InputMode};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) {
    if let Event::Key(key) = event {
        handle_key_event(app, key);
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => handle_search_key(app, key),
        InputMode::AddExpense => handle_form_key(app, key),
        InputMode::ConfirmDelete => handle_confirm_key(app, key),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    app.clear_status();

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),

        KeyCode::Tab => app.switch_view(app.active_view.next()),
        KeyCode::BackTab => app.switch_view(app.active_view.prev()),
        KeyCode::Char('1') => app.switch_view(ActiveView::Dashboard),
        KeyCode::Char('2') => app.switch_view(ActiveView::Expenses),
        KeyCode::Char('3') => app.switch_view(ActiveView::Recurring),

        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),

        KeyCode::Char('/') => {
            if app.active_view != ActiveView::Expenses {
                app.switch_view(ActiveView::Expenses);
            }
            app.input_mode = InputMode::Search;
        }
        KeyCode::Char('c') => {
            if app.active_view != ActiveView::Expenses {
                app.switch_view(ActiveView::Expenses);
            }
            app.cycle_category();
        }
        KeyCode::Esc => {
            app.search.clear();
            app.category_filter = Default::default();
            app.selected_index = 0;
        }

        KeyCode::Char('a') => app.open_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('r') => app.run_rollover(),
        KeyCode::Char('x') => app.export_csv(),

        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.search.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => app.search.backspace(),
        KeyCode::Left => app.search.move_left(),
        KeyCode::Right => app.search.move_right(),
        KeyCode::Char(c) => app.search.insert(c),
        _ => return,
    }
    app.selected_index = 0;
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => app.form.focused = app.form.focused.next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focused = app.form.focused.prev(),

        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
            if app.form.focused == FormField::Frequency =>
        {
            app.form.cycle_frequency()
        }

        KeyCode::Backspace => {
            if let Some(input) = app.form.focused_input_mut() {
                input.backspace();
            }
        }
        KeyCode::Left => {
            if let Some(input) = app.form.focused_input_mut() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = app.form.focused_input_mut() {
                input.move_right();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.form.focused_input_mut() {
                input.insert(c);
            }
        }
        _ => {}
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_status("Delete cancelled");
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::{ExpensePaths, Settings};
    use crate::storage::{ExpenseStore, Storage};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_keys() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());

        let mut app = App::new(&storage, &settings, &clock);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = App::new(&storage, &settings, &clock);
        handle_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_view_switching() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        let mut app = App::new(&storage, &settings, &clock);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_view, ActiveView::Expenses);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active_view, ActiveView::Recurring);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_view, ActiveView::Expenses);
    }

    #[test]
    fn test_search_mode_typing() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        let mut app = App::new(&storage, &settings, &clock);

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Search);
        assert_eq!(app.active_view, ActiveView::Expenses);

        // 'q' is text while searching
        type_text(&mut app, "qfo");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.search.value(), "qf");
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.search.value(), "");
    }

    #[test]
    fn test_add_recurring_through_form() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        let mut app = App::new(&storage, &settings, &clock);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.input_mode, InputMode::AddExpense);
        type_text(&mut app, "50");

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.form.focused, FormField::Frequency);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.frequency_label(), "Monthly");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);

        let all = storage.expenses.fetch_all().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_recurring);
        assert_eq!(all[0].next_due_date, NaiveDate::from_ymd_opt(2024, 4, 10));
        assert_eq!(storage.reminders.pending().unwrap().len(), 1);
    }

    #[test]
    fn test_cancelled_delete_keeps_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        let mut app = App::new(&storage, &settings, &clock);

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "5");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.input_mode, InputMode::ConfirmDelete);
        press(&mut app, KeyCode::Char('n'));

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(storage.expenses.count().unwrap(), 1);
    }
}
