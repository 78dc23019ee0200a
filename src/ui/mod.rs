pub mod header_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod pomodoro_pane;
pub mod routine_pane;
pub mod styles;
pub mod timetable_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use header_pane::render_header_pane;
use input_form::render_settings_form;
use keybindings::{render_keybindings, render_status_line};
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{render_confirm_delete_modal, render_prompt};
use pomodoro_pane::render_pomodoro_pane;
use ratatui::Frame;
use routine_pane::render_routine_pane;
use timetable_pane::render_timetable_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_header_pane(f, app, layout.header_area);
    render_list_pane(f, app, layout.list_area);
    render_pomodoro_pane(f, app, layout.pomodoro_area);
    render_timetable_pane(f, app, layout.timetable_area);
    render_routine_pane(f, app, layout.routine_area);
    render_status_line(f, app, layout.status_area);

    match app.ui_mode {
        UiMode::Prompt => render_prompt(f, app, size),
        UiMode::PomodoroSettings => render_settings_form(f, app, size),
        UiMode::ConfirmDeleteModule => render_confirm_delete_modal(f, app, size),
        UiMode::Normal => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PhaseTimer, PlannerDocument, PromptKind};
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn draw(app: &AppState) -> String {
        let backend = TestBackend::new(140, 48);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn create_test_app() -> AppState {
        AppState::new(PlannerDocument::default(), PathBuf::from("data.json"), PhaseTimer::new(), 7.5)
    }

    #[test]
    fn test_render_main_screen() {
        let app = create_test_app();
        let screen = draw(&app);

        assert!(screen.contains("days until 2025-06-15"));
        assert!(screen.contains("Wake up"));
        assert!(screen.contains("04:00 AM"));
        assert!(screen.contains("00:00"));
    }

    #[test]
    fn test_render_invalid_wake_time() {
        let mut app = create_test_app();
        app.document.wake_time = "nonsense".to_string();
        let screen = draw(&app);
        assert!(screen.contains("Invalid time format"));
    }

    #[test]
    fn test_render_prompt() {
        let mut app = create_test_app();
        app.start_prompt(PromptKind::AddModule);
        let screen = draw(&app);
        assert!(screen.contains("Enter module name"));
    }
}
