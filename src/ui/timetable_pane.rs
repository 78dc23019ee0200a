use crate::app::AppState;
use crate::domain::Focus;
use crate::ui::styles::{border_style, default_style, focused_border_style, selected_style, title_style};
use chrono::{Local, Timelike};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the 24-hour timetable (04:00 AM through 03:00 AM)
pub fn render_timetable_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let current_hour = Local::now().hour();

    let items: Vec<ListItem> = app
        .document
        .timetable_rows()
        .into_iter()
        .map(|row| {
            let label_style = if row.hour == current_hour {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                title_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<9}", row.label), label_style),
                Span::raw("│ "),
                Span::styled(row.text, default_style()),
            ]))
        })
        .collect();

    let focused = app.focus == Focus::Timetable;
    let mut state = ListState::default();
    if focused {
        state.select(Some(app.selected_slot));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if focused { focused_border_style() } else { border_style() })
                .title(Span::styled(" 📅 Today's Timetable ", title_style())),
        )
        .highlight_style(selected_style());

    f.render_stateful_widget(list, area, &mut state);
}
