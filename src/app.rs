use crate::domain::{
    generate, Focus, PhaseCompleted, PhaseTimer, PlannerDocument, PromptKind, RagStatus, ScheduleEntry,
    ScheduleError, UiMode, HOME_MODULE,
};
use crate::notifications;
use crate::persistence::save_document;
use crate::ticker::SecondTicker;
use anyhow::Result;
use chrono::NaiveDateTime;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How long a flash message stays in the status line
pub const FLASH_DURATION: Duration = Duration::from_secs(3);

/// Number of fields in the Pomodoro settings form
pub const SETTINGS_FIELDS: usize = 3;

/// Single-line text prompt
#[derive(Debug, Clone)]
pub struct PromptState {
    pub kind: PromptKind,
    pub input: String,
}

/// Pomodoro settings form (work / short break / long break, in minutes)
#[derive(Debug, Clone)]
pub struct SettingsFormState {
    pub fields: [String; SETTINGS_FIELDS],
    pub editing_field: usize,
}

/// Transient status line message
#[derive(Debug, Clone)]
pub struct Flash {
    pub message: String,
    pub is_error: bool,
    pub expires_at: Instant,
}

/// Main application state
pub struct AppState {
    pub document: PlannerDocument,
    pub data_path: PathBuf,
    pub timer: PhaseTimer,
    pub ticker: SecondTicker,
    pub sleep_hours: f64,
    pub focus: Focus,
    pub selected_module: usize,
    pub selected_task: usize,
    pub selected_slot: usize,
    pub ui_mode: UiMode,
    pub prompt: Option<PromptState>,
    pub settings_form: Option<SettingsFormState>,
    pub flash: Option<Flash>,
    pub needs_save: bool,
    pub notify: bool,
}

impl AppState {
    pub fn new(document: PlannerDocument, data_path: PathBuf, timer: PhaseTimer, sleep_hours: f64) -> Self {
        Self {
            document,
            data_path,
            timer,
            ticker: SecondTicker::new(),
            sleep_hours,
            focus: Focus::Tasks,
            selected_module: 0,
            selected_task: 0,
            selected_slot: 0,
            ui_mode: UiMode::Normal,
            prompt: None,
            settings_form: None,
            flash: None,
            needs_save: false,
            notify: true,
        }
    }

    /// Name of the module tab in view
    pub fn current_module_name(&self) -> &str {
        self.document
            .modules
            .get(self.selected_module)
            .map(|m| m.name.as_str())
            .unwrap_or(HOME_MODULE)
    }

    fn current_task_count(&self) -> usize {
        self.document
            .modules
            .get(self.selected_module)
            .map(|m| m.tasks.len())
            .unwrap_or(0)
    }

    /// Keep selections inside their lists after a removal
    fn clamp_selection(&mut self) {
        if self.selected_module >= self.document.modules.len() {
            self.selected_module = self.document.modules.len().saturating_sub(1);
        }
        let count = self.current_task_count();
        if self.selected_task >= count {
            self.selected_task = count.saturating_sub(1);
        }
    }

    pub fn next_module(&mut self) {
        let count = self.document.modules.len();
        if count > 0 {
            self.selected_module = (self.selected_module + 1) % count;
            self.selected_task = 0;
        }
    }

    pub fn previous_module(&mut self) {
        let count = self.document.modules.len();
        if count > 0 {
            self.selected_module = (self.selected_module + count - 1) % count;
            self.selected_task = 0;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    /// Move selection up in the focused pane
    pub fn move_selection_up(&mut self) {
        match self.focus {
            Focus::Tasks => self.selected_task = self.selected_task.saturating_sub(1),
            Focus::Timetable => self.selected_slot = self.selected_slot.saturating_sub(1),
        }
    }

    /// Move selection down in the focused pane
    pub fn move_selection_down(&mut self) {
        match self.focus {
            Focus::Tasks => {
                if self.selected_task + 1 < self.current_task_count() {
                    self.selected_task += 1;
                }
            }
            Focus::Timetable => {
                if self.selected_slot + 1 < 24 {
                    self.selected_slot += 1;
                }
            }
        }
    }

    /// Advance the selected task's RAG status
    pub fn cycle_selected_status(&mut self, now: NaiveDateTime) {
        let module = self.current_module_name().to_string();
        match self.document.cycle_task_status(&module, self.selected_task, now) {
            Ok(status) => {
                if status == RagStatus::Green {
                    tracing::info!(module = %module, "task completed");
                }
                self.needs_save = true;
            }
            Err(e) => self.flash_error(e.to_string()),
        }
    }

    pub fn delete_selected_task(&mut self) {
        let module = self.current_module_name().to_string();
        match self.document.delete_task(&module, self.selected_task) {
            Ok(_) => {
                self.clamp_selection();
                self.needs_save = true;
            }
            Err(e) => self.flash_error(e.to_string()),
        }
    }

    pub fn cycle_priority_rag(&mut self) {
        self.document.cycle_priority_rag();
        self.needs_save = true;
    }

    /// Open a prompt, pre-filled with the current value where one exists
    pub fn start_prompt(&mut self, kind: PromptKind) {
        let input = match &kind {
            PromptKind::AddTask | PromptKind::AddModule => String::new(),
            PromptKind::Priority => self.document.priority.clone(),
            PromptKind::TargetDate => self.document.target_date.clone(),
            PromptKind::WakeTime => self.document.wake_time.clone(),
            PromptKind::TimetableSlot { hour } => self
                .document
                .timetable
                .get(&crate::domain::planner::timetable_key(*hour))
                .cloned()
                .unwrap_or_default(),
        };
        self.prompt = Some(PromptState { kind, input });
        self.ui_mode = UiMode::Prompt;
    }

    /// Edit the selected timetable slot
    pub fn start_edit_slot(&mut self) {
        let rows = self.document.timetable_rows();
        if let Some(row) = rows.get(self.selected_slot) {
            self.start_prompt(PromptKind::TimetableSlot { hour: row.hour });
        }
    }

    pub fn prompt_add_char(&mut self, c: char) {
        if let Some(prompt) = &mut self.prompt {
            prompt.input.push(c);
        }
    }

    pub fn prompt_backspace(&mut self) {
        if let Some(prompt) = &mut self.prompt {
            prompt.input.pop();
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Apply the prompt. On a validation error the prompt stays open so the
    /// user can correct the input.
    pub fn submit_prompt(&mut self, now: NaiveDateTime) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };

        let result = match &prompt.kind {
            PromptKind::AddTask => {
                let module = self.current_module_name().to_string();
                self.document.add_task(&module, &prompt.input, now).map(|_| {
                    self.selected_task = self.current_task_count().saturating_sub(1);
                    None
                })
            }
            PromptKind::AddModule => self.document.add_module(&prompt.input).map(|name| {
                tracing::info!(module = %name, "module created");
                self.selected_module = self.document.modules.len() - 1;
                self.selected_task = 0;
                Some(format!("Module '{}' created!", name))
            }),
            PromptKind::Priority => {
                self.document.set_priority(&prompt.input);
                Ok(None)
            }
            PromptKind::TargetDate => self.document.set_target_date(&prompt.input).map(|_| None),
            PromptKind::WakeTime => self.document.set_wake_time(&prompt.input).map(|_| None),
            PromptKind::TimetableSlot { hour } => {
                self.document.set_timetable_slot(*hour, &prompt.input);
                Ok(Some("Timetable saved! 🌟".to_string()))
            }
        };

        match result {
            Ok(message) => {
                self.needs_save = true;
                self.ui_mode = UiMode::Normal;
                if let Some(message) = message {
                    self.flash_info(message);
                }
            }
            Err(e) => {
                self.flash_error(e.to_string());
                self.prompt = Some(prompt);
            }
        }
    }

    /// Ask before deleting the module in view (Home is protected)
    pub fn start_delete_module(&mut self) {
        if self.current_module_name() == HOME_MODULE {
            self.flash_error(format!("Module '{}' cannot be deleted", HOME_MODULE));
            return;
        }
        self.ui_mode = UiMode::ConfirmDeleteModule;
    }

    pub fn confirm_delete_module(&mut self) {
        let name = self.current_module_name().to_string();
        match self.document.delete_module(&name) {
            Ok(_) => {
                tracing::info!(module = %name, "module deleted");
                self.selected_task = 0;
                self.clamp_selection();
                self.needs_save = true;
                self.flash_info(format!("'{}' deleted.", name));
            }
            Err(e) => self.flash_error(e.to_string()),
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_delete_module(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Open the Pomodoro settings form with the current durations
    pub fn open_pomodoro_settings(&mut self) {
        let durations = self.timer.durations();
        self.settings_form = Some(SettingsFormState {
            fields: [
                (durations.work / 60).to_string(),
                (durations.short_break / 60).to_string(),
                (durations.long_break / 60).to_string(),
            ],
            editing_field: 0,
        });
        self.ui_mode = UiMode::PomodoroSettings;
    }

    pub fn settings_toggle_field(&mut self) {
        if let Some(form) = &mut self.settings_form {
            form.editing_field = (form.editing_field + 1) % SETTINGS_FIELDS;
        }
    }

    pub fn settings_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.settings_form {
            form.fields[form.editing_field].push(c);
        }
    }

    pub fn settings_backspace(&mut self) {
        if let Some(form) = &mut self.settings_form {
            form.fields[form.editing_field].pop();
        }
    }

    pub fn submit_settings(&mut self) {
        let Some(form) = &self.settings_form else {
            return;
        };
        let [work, short_break, long_break] = &form.fields;

        match self.timer.configure_from_input(work, short_break, long_break) {
            Ok(()) => {
                self.settings_form = None;
                self.ui_mode = UiMode::Normal;
                self.flash_info("Settings Applied!");
            }
            Err(e) => self.flash_error(e.to_string()),
        }
    }

    pub fn cancel_settings(&mut self) {
        self.settings_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Start the Pomodoro cadence (no-op if already running)
    pub fn start_pomodoro(&mut self, now: Instant) {
        if self.timer.start().is_some() {
            self.ticker.arm(now);
        }
    }

    /// Stop the Pomodoro and cancel its pending tick
    pub fn reset_pomodoro(&mut self) {
        self.timer.reset();
        self.ticker.cancel();
    }

    /// Drive time-based state. Returns any phase transitions that happened.
    pub fn tick(&mut self, now: Instant) -> Vec<PhaseCompleted> {
        let mut events = Vec::new();

        for _ in 0..self.ticker.due(now) {
            if let Some(event) = self.timer.tick() {
                events.push(event);
            }
        }
        if !self.timer.is_running() && self.ticker.is_armed() {
            self.ticker.cancel();
        }

        for event in &events {
            if self.notify {
                notifications::notify_phase_complete(event.finished, event.next);
            }
            self.flash_info(notifications::phase_message(event.finished, event.next));
        }

        if self.flash.as_ref().is_some_and(|f| f.expires_at <= now) {
            self.flash = None;
        }

        events
    }

    /// Daily routine for the stored wake time
    pub fn schedule(&self) -> Result<Vec<ScheduleEntry>, ScheduleError> {
        generate(&self.document.wake_time, self.sleep_hours)
    }

    pub fn flash_info(&mut self, message: impl Into<String>) {
        self.set_flash(message.into(), false);
    }

    pub fn flash_error(&mut self, message: impl Into<String>) {
        self.set_flash(message.into(), true);
    }

    fn set_flash(&mut self, message: String, is_error: bool) {
        self.flash = Some(Flash {
            message,
            is_error,
            expires_at: Instant::now() + FLASH_DURATION,
        });
    }

    /// Save state to disk
    pub fn save(&mut self) -> Result<()> {
        save_document(&self.data_path, &self.document)?;
        self.needs_save = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Phase;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(10, 0, 0).unwrap()
    }

    fn create_test_app() -> AppState {
        let mut document = PlannerDocument::default();
        document.add_task(HOME_MODULE, "Task 1", now()).unwrap();
        document.add_task(HOME_MODULE, "Task 2", now()).unwrap();
        let mut app = AppState::new(document, PathBuf::from("data.json"), PhaseTimer::new(), 7.5);
        app.notify = false;
        app
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            app.prompt_add_char(c);
        }
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert_eq!(app.current_module_name(), "Home");
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.focus, Focus::Tasks);
        assert!(!app.needs_save);
    }

    #[test]
    fn test_move_selection() {
        let mut app = create_test_app();

        app.move_selection_down();
        assert_eq!(app.selected_task, 1);

        // Can't go past the last task
        app.move_selection_down();
        assert_eq!(app.selected_task, 1);

        app.move_selection_up();
        app.move_selection_up();
        assert_eq!(app.selected_task, 0);

        app.toggle_focus();
        app.move_selection_down();
        assert_eq!(app.selected_slot, 1);
        assert_eq!(app.selected_task, 0);
    }

    #[test]
    fn test_module_navigation_wraps() {
        let mut app = create_test_app();
        app.previous_module();
        assert_eq!(app.current_module_name(), "PROJECT");
        app.next_module();
        assert_eq!(app.current_module_name(), "Home");
        app.next_module();
        assert_eq!(app.current_module_name(), "CS101");
    }

    #[test]
    fn test_add_task_via_prompt() {
        let mut app = create_test_app();
        app.start_prompt(PromptKind::AddTask);
        assert_eq!(app.ui_mode, UiMode::Prompt);

        type_text(&mut app, "Task 3");
        app.submit_prompt(now());

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.prompt.is_none());
        assert_eq!(app.document.module("Home").unwrap().tasks.len(), 3);
        assert_eq!(app.selected_task, 2);
        assert!(app.needs_save);
    }

    #[test]
    fn test_empty_task_keeps_prompt_open() {
        let mut app = create_test_app();
        app.start_prompt(PromptKind::AddTask);
        type_text(&mut app, "   ");
        app.submit_prompt(now());

        assert_eq!(app.ui_mode, UiMode::Prompt);
        assert!(app.prompt.is_some());
        assert!(app.flash.as_ref().unwrap().is_error);
        assert!(!app.needs_save);
    }

    #[test]
    fn test_prompt_prefills_current_value() {
        let mut app = create_test_app();
        app.start_prompt(PromptKind::TargetDate);
        assert_eq!(app.prompt.as_ref().unwrap().input, "2025-06-15");

        app.prompt_backspace();
        app.prompt_add_char('6');
        app.submit_prompt(now());
        assert_eq!(app.document.target_date, "2025-06-16");
    }

    #[test]
    fn test_invalid_wake_time_rejected() {
        let mut app = create_test_app();
        app.start_prompt(PromptKind::WakeTime);
        app.prompt.as_mut().unwrap().input = "25:99".to_string();
        app.submit_prompt(now());

        assert_eq!(app.document.wake_time, "09:00");
        assert_eq!(app.ui_mode, UiMode::Prompt);
    }

    #[test]
    fn test_edit_timetable_slot() {
        let mut app = create_test_app();
        app.toggle_focus();
        app.move_selection_down(); // 05:00
        app.start_edit_slot();
        assert_eq!(app.prompt.as_ref().unwrap().kind, PromptKind::TimetableSlot { hour: 5 });

        type_text(&mut app, "Gym");
        app.submit_prompt(now());
        assert_eq!(app.document.timetable.get("05:00").map(String::as_str), Some("Gym"));
    }

    #[test]
    fn test_cycle_and_delete_task() {
        let mut app = create_test_app();
        app.move_selection_down();
        app.cycle_selected_status(now());
        assert_eq!(app.document.module("Home").unwrap().tasks[1].status, RagStatus::Amber);

        app.delete_selected_task();
        assert_eq!(app.document.module("Home").unwrap().tasks.len(), 1);
        assert_eq!(app.selected_task, 0);
    }

    #[test]
    fn test_delete_home_module_refused() {
        let mut app = create_test_app();
        app.start_delete_module();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.flash.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_add_and_delete_module() {
        let mut app = create_test_app();
        app.start_prompt(PromptKind::AddModule);
        type_text(&mut app, "ART");
        app.submit_prompt(now());
        assert_eq!(app.current_module_name(), "ART");

        app.start_delete_module();
        assert_eq!(app.ui_mode, UiMode::ConfirmDeleteModule);
        app.confirm_delete_module();
        assert!(app.document.module("ART").is_none());
        assert_eq!(app.current_module_name(), "PROJECT");
    }

    #[test]
    fn test_pomodoro_settings_form() {
        let mut app = create_test_app();
        app.open_pomodoro_settings();
        assert_eq!(app.settings_form.as_ref().unwrap().fields[0], "25");

        app.settings_backspace();
        app.settings_backspace();
        app.settings_add_char('5');
        app.settings_add_char('0');
        app.submit_settings();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.timer.durations().work, 3000);
    }

    #[test]
    fn test_pomodoro_settings_invalid() {
        let mut app = create_test_app();
        app.open_pomodoro_settings();
        app.settings_toggle_field();
        app.settings_backspace();
        app.settings_add_char('0');
        app.settings_backspace();
        app.settings_add_char('x');
        app.submit_settings();

        assert_eq!(app.ui_mode, UiMode::PomodoroSettings);
        assert_eq!(app.timer.durations().short_break, 300);
    }

    #[test]
    fn test_pomodoro_driven_by_ticks() {
        let mut app = create_test_app();
        app.timer.configure(1, 1, 1).unwrap();
        let start = Instant::now();

        app.start_pomodoro(start);
        assert!(app.timer.is_running());
        assert!(app.ticker.is_armed());

        assert!(app.tick(start + Duration::from_secs(30)).is_empty());
        assert_eq!(app.timer.remaining_seconds(), 30);

        let events = app.tick(start + Duration::from_secs(60));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].finished, Phase::Work);
        assert_eq!(app.timer.current_phase(), Some(Phase::ShortBreak));
        assert_eq!(app.timer.remaining_seconds(), 60);
        assert!(app.ticker.is_armed());
    }

    #[test]
    fn test_reset_cancels_pending_tick() {
        let mut app = create_test_app();
        let start = Instant::now();
        app.start_pomodoro(start);
        app.reset_pomodoro();

        assert!(!app.ticker.is_armed());
        assert!(app.tick(start + Duration::from_secs(10)).is_empty());
        assert_eq!(app.timer.remaining_seconds(), 0);
        assert_eq!(app.timer.repetition_count(), 0);
    }

    #[test]
    fn test_start_pomodoro_twice_is_noop() {
        let mut app = create_test_app();
        let start = Instant::now();
        app.start_pomodoro(start);
        app.start_pomodoro(start + Duration::from_millis(500));
        assert_eq!(app.timer.repetition_count(), 1);
    }

    #[test]
    fn test_schedule_uses_stored_wake_time() {
        let app = create_test_app();
        let entries = app.schedule().unwrap();
        assert_eq!(entries[0].clock_time.format("%H:%M").to_string(), "09:00");
    }

    #[test]
    fn test_save_writes_document() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app();
        app.data_path = temp_dir.path().join("data.json");
        app.cycle_priority_rag();
        assert!(app.needs_save);

        app.save().unwrap();
        assert!(!app.needs_save);

        let loaded = crate::persistence::load_document(&app.data_path).unwrap();
        assert_eq!(loaded.priority_rag, RagStatus::Amber);
    }
}
