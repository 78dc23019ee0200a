use crate::app::AppState;
use crate::ui::styles::{border_style, hint_style, marks_style, phase_style, title_style};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the embedded Pomodoro timer
pub fn render_pomodoro_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let timer = &app.timer;
    let phase = timer.current_phase();
    let heading = phase.map(|p| p.label()).unwrap_or("Pomodoro");

    let durations = timer.durations();
    let lines = vec![
        Line::from(Span::styled(heading, phase_style(phase))),
        Line::from(Span::styled(
            timer.format_remaining(),
            phase_style(phase).add_modifier(Modifier::REVERSED),
        )),
        Line::from(Span::styled(timer.marks_display(), marks_style())),
        Line::from(Span::styled(
            format!(
                "round {} · work {}m · short {}m · long {}m",
                timer.repetition_count(),
                durations.work / 60,
                durations.short_break / 60,
                durations.long_break / 60
            ),
            hint_style(),
        )),
        Line::from(Span::styled(
            if timer.is_running() { "z reset   o settings" } else { "s ▶ start   z ⏹ reset   o settings" },
            hint_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" ⏱ Pomodoro ", title_style())),
    );

    f.render_widget(paragraph, area);
}
