use crate::app::{AppState, SETTINGS_FIELDS};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const FIELD_LABELS: [&str; SETTINGS_FIELDS] = ["Work (min):", "Short Break:", "Long Break:"];

/// Render the Pomodoro settings form
pub fn render_settings_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.settings_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = vec![Line::raw("")];

        for (idx, label) in FIELD_LABELS.iter().enumerate() {
            let editing = idx == form.editing_field;
            lines.push(Line::from(vec![
                Span::raw(format!("  {:<13}", label)),
                Span::styled(form.fields[idx].as_str(), modal_title_style()),
                if editing {
                    Span::styled("█", modal_title_style()) // Cursor
                } else {
                    Span::raw("")
                },
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::raw("  Tab to switch fields  ·  Enter to apply  ·  Esc to cancel"));
        lines.push(Line::raw(""));
        lines.push(Line::raw("  New lengths apply from the next phase."));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" ⏱ Pomodoro Settings ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
