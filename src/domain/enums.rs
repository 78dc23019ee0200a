use serde::{Deserialize, Serialize};

/// Red/amber/green progress marker, plus a neutral "parked" state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RagStatus {
    Red,
    Amber,
    Green,
    Neutral,
}

impl RagStatus {
    /// Parse a stored status symbol like "🟡"
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "🔴" => Some(Self::Red),
            "🟡" => Some(Self::Amber),
            "🟢" => Some(Self::Green),
            "🔘" => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Symbol written to the data file
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Red => "🔴",
            Self::Amber => "🟡",
            Self::Green => "🟢",
            Self::Neutral => "🔘",
        }
    }

    /// Next status in the click cycle (wraps Neutral -> Red)
    pub fn next(&self) -> Self {
        match self {
            Self::Red => Self::Amber,
            Self::Amber => Self::Green,
            Self::Green => Self::Neutral,
            Self::Neutral => Self::Red,
        }
    }
}

impl Default for RagStatus {
    fn default() -> Self {
        Self::Red
    }
}

// Unknown symbols in old files are read as Red so the cycle restarts cleanly
impl From<String> for RagStatus {
    fn from(symbol: String) -> Self {
        Self::from_symbol(&symbol).unwrap_or_default()
    }
}

impl From<RagStatus> for String {
    fn from(status: RagStatus) -> Self {
        status.symbol().to_string()
    }
}

/// One timed segment of the Pomodoro cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Select the phase for a repetition count.
    /// Every 8th start is a long break, other even starts are short breaks.
    pub fn for_repetition(count: u32) -> Self {
        if count % 8 == 0 {
            Self::LongBreak
        } else if count % 2 == 0 {
            Self::ShortBreak
        } else {
            Self::Work
        }
    }

    /// Heading shown above the countdown
    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak | Self::LongBreak => "Break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Self::Work)
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Prompt,
    PomodoroSettings,
    ConfirmDeleteModule,
}

/// Pane that currently receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tasks,
    Timetable,
}

impl Focus {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Tasks => Self::Timetable,
            Self::Timetable => Self::Tasks,
        }
    }
}

/// What a single-line prompt is collecting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    AddTask,
    AddModule,
    Priority,
    TargetDate,
    WakeTime,
    TimetableSlot { hour: u32 },
}

impl PromptKind {
    /// Title shown on the prompt border
    pub fn title(&self) -> String {
        match self {
            Self::AddTask => " ➕ Add New Task ".to_string(),
            Self::AddModule => " New Module ".to_string(),
            Self::Priority => " 🎯 Priority Task ".to_string(),
            Self::TargetDate => " Change Deadline ".to_string(),
            Self::WakeTime => " Wake Time ".to_string(),
            Self::TimetableSlot { hour } => format!(" Timetable {:02}:00 ", hour),
        }
    }

    /// Hint line shown under the input
    pub fn hint(&self) -> &'static str {
        match self {
            Self::AddTask => "Describe the task",
            Self::AddModule => "Enter module name",
            Self::Priority => "What matters most today?",
            Self::TargetDate => "Enter date (YYYY-MM-DD)",
            Self::WakeTime => "Use HH:MM (e.g., 09:00)",
            Self::TimetableSlot { .. } => "Leave empty to clear the slot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rag_status_cycle() {
        assert_eq!(RagStatus::Red.next(), RagStatus::Amber);
        assert_eq!(RagStatus::Amber.next(), RagStatus::Green);
        assert_eq!(RagStatus::Green.next(), RagStatus::Neutral);
        assert_eq!(RagStatus::Neutral.next(), RagStatus::Red);
    }

    #[test]
    fn test_rag_status_symbols() {
        for status in [RagStatus::Red, RagStatus::Amber, RagStatus::Green, RagStatus::Neutral] {
            assert_eq!(RagStatus::from_symbol(status.symbol()), Some(status));
        }
        assert_eq!(RagStatus::from_symbol("?"), None);
        assert_eq!(RagStatus::from("⚪".to_string()), RagStatus::Red);
    }

    #[test]
    fn test_phase_for_repetition() {
        let phases: Vec<Phase> = (1..=8).map(Phase::for_repetition).collect();
        assert_eq!(
            phases,
            vec![
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::LongBreak,
            ]
        );
        assert_eq!(Phase::for_repetition(16), Phase::LongBreak);
        assert_eq!(Phase::for_repetition(10), Phase::ShortBreak);
    }

    #[test]
    fn test_phase_label() {
        assert_eq!(Phase::Work.label(), "Work");
        assert_eq!(Phase::LongBreak.label(), "Break");
        assert!(Phase::ShortBreak.is_break());
        assert!(!Phase::Work.is_break());
    }
}
