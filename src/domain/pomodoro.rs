use super::enums::Phase;
use thiserror::Error;

/// Default work phase length in minutes
pub const DEFAULT_WORK_MIN: i64 = 25;
/// Default short break length in minutes
pub const DEFAULT_SHORT_BREAK_MIN: i64 = 5;
/// Default long break length in minutes
pub const DEFAULT_LONG_BREAK_MIN: i64 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("Invalid time! Durations must be whole minutes greater than zero")]
    InvalidConfiguration,
}

/// Phase lengths in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerDurations {
    pub work: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl TimerDurations {
    /// Build durations from minute values, rejecting anything <= 0
    pub fn from_minutes(work_min: i64, short_break_min: i64, long_break_min: i64) -> Result<Self, TimerError> {
        Ok(Self {
            work: minutes_to_secs(work_min)?,
            short_break: minutes_to_secs(short_break_min)?,
            long_break: minutes_to_secs(long_break_min)?,
        })
    }

    /// Duration for a given phase
    pub fn for_phase(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self {
            work: (DEFAULT_WORK_MIN * 60) as u32,
            short_break: (DEFAULT_SHORT_BREAK_MIN * 60) as u32,
            long_break: (DEFAULT_LONG_BREAK_MIN * 60) as u32,
        }
    }
}

fn minutes_to_secs(minutes: i64) -> Result<u32, TimerError> {
    if minutes <= 0 {
        return Err(TimerError::InvalidConfiguration);
    }
    minutes
        .checked_mul(60)
        .and_then(|secs| u32::try_from(secs).ok())
        .ok_or(TimerError::InvalidConfiguration)
}

/// Emitted by `tick` when the active phase runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseCompleted {
    /// Phase that just reached 00:00
    pub finished: Phase,
    /// Phase that was started automatically in its place
    pub next: Phase,
    /// Completion marks after the transition
    pub completion_marks: u32,
}

/// Pomodoro work/break cadence.
///
/// The timer does no timekeeping of its own: the host calls `tick` once per
/// elapsed second while it is running. Once started it never idles between
/// phases; each expiry chains straight into the next phase.
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    durations: TimerDurations,
    repetition_count: u32,
    remaining_seconds: u32,
    is_running: bool,
    current_phase: Option<Phase>,
    completion_marks: u32,
}

impl PhaseTimer {
    /// Timer with the fixed 25/5/15 cadence
    pub fn new() -> Self {
        Self::with_durations(TimerDurations::default())
    }

    pub fn with_durations(durations: TimerDurations) -> Self {
        Self {
            durations,
            repetition_count: 0,
            remaining_seconds: 0,
            is_running: false,
            current_phase: None,
            completion_marks: 0,
        }
    }

    /// Replace the phase lengths (minutes). An active phase keeps its
    /// remaining time; the new values apply from the next phase start.
    pub fn configure(&mut self, work_min: i64, short_break_min: i64, long_break_min: i64) -> Result<(), TimerError> {
        self.durations = TimerDurations::from_minutes(work_min, short_break_min, long_break_min)?;
        tracing::info!(
            work = self.durations.work,
            short_break = self.durations.short_break,
            long_break = self.durations.long_break,
            "pomodoro durations configured"
        );
        Ok(())
    }

    /// Same as `configure`, parsing raw user input first
    pub fn configure_from_input(&mut self, work: &str, short_break: &str, long_break: &str) -> Result<(), TimerError> {
        let parse = |s: &str| s.trim().parse::<i64>().map_err(|_| TimerError::InvalidConfiguration);
        let (work, short_break, long_break) = (parse(work)?, parse(short_break)?, parse(long_break)?);
        self.configure(work, short_break, long_break)
    }

    /// Start the next phase. Returns `None` if a phase is already running.
    pub fn start(&mut self) -> Option<Phase> {
        if self.is_running {
            return None;
        }

        self.repetition_count += 1;
        let phase = Phase::for_repetition(self.repetition_count);
        self.remaining_seconds = self.durations.for_phase(phase);
        self.current_phase = Some(phase);
        self.is_running = true;

        tracing::debug!(repetition = self.repetition_count, ?phase, "phase started");
        Some(phase)
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> Option<PhaseCompleted> {
        if !self.is_running {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }

        let finished = self.current_phase.unwrap_or(Phase::Work);
        self.is_running = false;
        let next = self.start().unwrap_or(finished);
        self.completion_marks = self.repetition_count / 2;

        tracing::info!(?finished, ?next, marks = self.completion_marks, "phase completed");
        Some(PhaseCompleted {
            finished,
            next,
            completion_marks: self.completion_marks,
        })
    }

    /// Stop and clear all progress
    pub fn reset(&mut self) {
        self.is_running = false;
        self.remaining_seconds = 0;
        self.repetition_count = 0;
        self.current_phase = None;
        self.completion_marks = 0;
        tracing::info!("pomodoro reset");
    }

    pub fn durations(&self) -> TimerDurations {
        self.durations
    }

    pub fn repetition_count(&self) -> u32 {
        self.repetition_count
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Phase being counted down (None before the first start or after reset)
    pub fn current_phase(&self) -> Option<Phase> {
        self.current_phase
    }

    pub fn completion_marks(&self) -> u32 {
        self.completion_marks
    }

    /// Remaining time as "MM:SS"
    pub fn format_remaining(&self) -> String {
        let remaining = self.remaining_seconds();
        format!("{:02}:{:02}", remaining / 60, remaining % 60)
    }

    /// One check mark per completed work/break pair
    pub fn marks_display(&self) -> String {
        "✔".repeat(self.completion_marks() as usize)
    }
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new()
    }
}
