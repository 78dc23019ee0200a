use crate::app::AppState;
use crate::domain::schedule::error_line;
use crate::ui::styles::{border_style, error_style, title_style, tone_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the wake-time based daily routine
pub fn render_routine_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let lines: Vec<Line> = match app.schedule() {
        Ok(entries) => entries
            .iter()
            .map(|entry| Line::from(Span::styled(format!(" {}", entry.display_line()), tone_style(entry.tone()))))
            .collect(),
        Err(e) => vec![Line::from(Span::styled(format!(" {}", error_line(&e)), error_style()))],
    };

    let title = format!(" Daily Routine · wake {} ", app.document.wake_time);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(paragraph, area);
}
