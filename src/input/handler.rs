use crate::app::AppState;
use crate::domain::{Focus, PromptKind, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Prompt => handle_prompt_mode(app, key),
        UiMode::PomodoroSettings => handle_settings_mode(app, key),
        UiMode::ConfirmDeleteModule => handle_confirm_mode(app, key),
    }
}

fn local_now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        KeyCode::Left | KeyCode::Char('[') => app.previous_module(),
        KeyCode::Right | KeyCode::Char(']') => app.next_module(),
        KeyCode::Tab => app.toggle_focus(),

        // Cycle task status, or edit the timetable slot
        KeyCode::Enter | KeyCode::Char(' ') => match app.focus {
            Focus::Tasks => app.cycle_selected_status(local_now()),
            Focus::Timetable => app.start_edit_slot(),
        },

        // Tasks
        KeyCode::Char('a') => app.start_prompt(PromptKind::AddTask),
        KeyCode::Char('x') | KeyCode::Delete => {
            if app.focus == Focus::Tasks {
                app.delete_selected_task();
            }
        }

        // Modules
        KeyCode::Char('M') => app.start_prompt(PromptKind::AddModule),
        KeyCode::Char('D') => app.start_delete_module(),

        // Priority
        KeyCode::Char('p') => app.start_prompt(PromptKind::Priority),
        KeyCode::Char('r') => app.cycle_priority_rag(),

        // Deadline and routine
        KeyCode::Char('t') => app.start_prompt(PromptKind::TargetDate),
        KeyCode::Char('w') => app.start_prompt(PromptKind::WakeTime),

        // Pomodoro
        KeyCode::Char('s') => app.start_pomodoro(Instant::now()),
        KeyCode::Char('z') => app.reset_pomodoro(),
        KeyCode::Char('o') => app.open_pomodoro_settings(),

        _ => {}
    }
    Ok(false)
}

/// Handle keys while a text prompt is open
fn handle_prompt_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_prompt(local_now()),
        KeyCode::Esc => app.cancel_prompt(),
        KeyCode::Backspace => app.prompt_backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.prompt_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the Pomodoro settings form
fn handle_settings_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_settings(),
        KeyCode::Esc => app.cancel_settings(),
        KeyCode::Tab | KeyCode::Down => app.settings_toggle_field(),
        KeyCode::Backspace => app.settings_backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.settings_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the delete-module confirmation
fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete_module(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete_module(),
        _ => {}
    }
    Ok(false)
}
