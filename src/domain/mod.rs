pub mod enums;
pub mod planner;
pub mod pomodoro;
pub mod schedule;

pub use enums::{Focus, Phase, PromptKind, RagStatus, UiMode};
pub use planner::{PlannerDocument, HOME_MODULE};
pub use pomodoro::{PhaseCompleted, PhaseTimer, TimerDurations, TimerError};
pub use schedule::{
    generate, schedule_lines, validate_sleep_hours, ScheduleEntry, ScheduleError, ScheduleTone, DEFAULT_SLEEP_HOURS,
};
