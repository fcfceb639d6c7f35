use crate::app::AppState;
use crate::domain::{Tab, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Duration change per +/- press, in minutes
const DURATION_KEY_STEP: i32 = 5;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::TaskChoice => handle_task_choice_mode(app, key),
        UiMode::TaskCompletion => handle_task_completion_mode(app, key),
        UiMode::AddingTask | UiMode::AddingCategory => handle_input_form_mode(app, key),
        UiMode::Notice => {
            app.dismiss_notice();
            Ok(false)
        }
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        KeyCode::Tab => {
            app.next_tab();
            return Ok(false);
        }
        _ => {}
    }

    match app.tab {
        Tab::Timer => handle_timer_keys(app, key),
        Tab::Tasks => handle_task_keys(app, key),
        Tab::Reports => handle_report_keys(app, key),
    }
    Ok(false)
}

fn handle_timer_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_start_pause(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset(),

        // Adjust duration
        KeyCode::Char('+') | KeyCode::Char('=') => app.change_duration(DURATION_KEY_STEP),
        KeyCode::Char('-') | KeyCode::Char('_') => app.change_duration(-DURATION_KEY_STEP),

        // Category selection
        KeyCode::Right => app.next_category(),
        KeyCode::Left => app.previous_category(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(digit) = c.to_digit(10) {
                app.select_category(digit as usize - 1);
            }
        }
        KeyCode::Char('c') | KeyCode::Char('C') => app.start_add_category(),
        _ => {}
    }
}

fn handle_task_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.move_task_selection(-1),
        KeyCode::Down => app.move_task_selection(1),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected_task(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        _ => {}
    }
}

fn handle_report_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('p') | KeyCode::Char('P') => app.toggle_period(),
        KeyCode::Char('f') | KeyCode::Char('F') => app.cycle_category_filter(),
        KeyCode::Char('R') => app.reload_sessions(),
        _ => {}
    }
}

/// Handle keys in the task-choice prompt (last option means "no task")
fn handle_task_choice_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let option_count = app.task_choice_options().len() + 1;

    match key.code {
        KeyCode::Up => {
            app.task_choice_index = app.task_choice_index.saturating_sub(1);
        }
        KeyCode::Down => {
            app.task_choice_index = (app.task_choice_index + 1).min(option_count - 1);
        }
        KeyCode::Enter => app.choose_task(app.task_choice_index),
        KeyCode::Char('s') | KeyCode::Char('S') => app.choose_task(option_count - 1),
        KeyCode::Esc => app.cancel_task_choice(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the "did you finish the task?" prompt
fn handle_task_completion_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.resolve_task_completion(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.resolve_task_completion(false),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in input form mode (adding task/category)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),

        // Switch between name and description
        KeyCode::Tab => app.input_form_toggle_field(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, Settings};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app() -> AppState {
        AppState::new(Box::new(MemoryStore::default()), &Settings::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key(&mut app, ctrl_c).unwrap());
    }

    #[test]
    fn test_tab_cycles_screens() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.tab, Tab::Tasks);
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.tab, Tab::Reports);
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.tab, Tab::Timer);
    }

    #[test]
    fn test_timer_keys() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('3'))).unwrap();
        assert_eq!(app.engine.selected_category.as_deref(), Some("Proje"));

        handle_key(&mut app, key(KeyCode::Char('+'))).unwrap();
        assert_eq!(app.engine.session_duration, 1800);
        handle_key(&mut app, key(KeyCode::Char('-'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('-'))).unwrap();
        assert_eq!(app.engine.session_duration, 1200);

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.engine.is_running);
        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(!app.engine.is_running);
    }

    #[test]
    fn test_notice_dismissed_by_any_key() {
        let mut app = create_test_app();
        // No category selected yet
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Notice);

        let quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(!quit);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_add_task_from_tasks_tab() {
        let mut app = create_test_app();
        app.tab = Tab::Tasks;

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        type_text(&mut app, "Essay");
        handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks[0].name, "Essa");

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.tasks[0].completed);
    }

    #[test]
    fn test_task_choice_prompt_keys() {
        let mut app = create_test_app();
        app.add_task("Essay", "").unwrap();
        app.select_category(0);

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui_mode, UiMode::TaskChoice);

        // Down moves to "no task", then clamps
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.task_choice_index, 1);

        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.engine.is_running);
        assert_eq!(app.engine.selected_task.as_ref().unwrap().name, "Essay");
    }

    #[test]
    fn test_task_choice_escape_cancels_start() {
        let mut app = create_test_app();
        app.add_task("Essay", "").unwrap();
        app.select_category(0);

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(!app.engine.is_running);
        assert!(!app.engine.awaiting_task_choice);
    }

    #[test]
    fn test_report_keys() {
        let mut app = create_test_app();
        app.tab = Tab::Reports;

        handle_key(&mut app, key(KeyCode::Char('p'))).unwrap();
        assert_eq!(app.report_view.period, crate::domain::Period::Monthly);

        handle_key(&mut app, key(KeyCode::Char('f'))).unwrap();
        assert_eq!(app.report_view.category_filter.name(), "Ders Çalışma");
    }
}
