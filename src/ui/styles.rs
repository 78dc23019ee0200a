use crate::domain::{Phase, RagStatus, ScheduleTone};
use ratatui::style::{Color, Modifier, Style};

const GREEN: Color = Color::Rgb(155, 222, 172);
const PINK: Color = Color::Rgb(226, 151, 156);
const RED: Color = Color::Rgb(231, 48, 91);
const RAG_RED: Color = Color::Rgb(233, 144, 144);
const RAG_AMBER: Color = Color::Rgb(240, 200, 121);
const RAG_GREEN: Color = Color::Rgb(142, 202, 170);
const ACCENT: Color = Color::Rgb(54, 159, 194);

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Border of the pane that has keyboard focus
pub fn focused_border_style() -> Style {
    Style::default().fg(ACCENT)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default().fg(RED).add_modifier(Modifier::BOLD)
}

/// Confirmation message style
pub fn info_style() -> Style {
    Style::default().fg(GREEN)
}

/// Countdown header style
pub fn countdown_style() -> Style {
    Style::default().fg(GREEN).add_modifier(Modifier::BOLD)
}

/// Colour of a RAG marker
pub fn rag_style(status: RagStatus) -> Style {
    let color = match status {
        RagStatus::Red => RAG_RED,
        RagStatus::Amber => RAG_AMBER,
        RagStatus::Green => RAG_GREEN,
        RagStatus::Neutral => Color::Gray,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Colour of the Pomodoro heading (idle timer uses the work colour)
pub fn phase_style(phase: Option<Phase>) -> Style {
    let color = match phase {
        None | Some(Phase::Work) => GREEN,
        Some(Phase::ShortBreak) => PINK,
        Some(Phase::LongBreak) => RED,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Colour of a routine line
pub fn tone_style(tone: ScheduleTone) -> Style {
    match tone {
        ScheduleTone::Wake => Style::default().fg(GREEN),
        ScheduleTone::Sleep => Style::default().fg(RED),
        ScheduleTone::Caffeine => Style::default().fg(PINK),
        ScheduleTone::Plain => default_style(),
    }
}

/// Completion check marks
pub fn marks_style() -> Style {
    Style::default().fg(GREEN).add_modifier(Modifier::BOLD)
}
