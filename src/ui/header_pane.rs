use crate::app::AppState;
use crate::ui::styles::{border_style, countdown_style, default_style, hint_style, rag_style, title_style};
use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the header: deadline countdown, clock and today's priority
pub fn render_header_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let now = Local::now();
    let document = &app.document;

    let countdown = Line::from(vec![
        Span::styled(format!(" {}", document.countdown_line(now.naive_local())), countdown_style()),
        Span::styled(format!("   📅 {}", now.format("%-d %B %Y, %H:%M")), hint_style()),
    ]);

    let priority = Line::from(vec![
        Span::styled(" 🎯 ", title_style()),
        Span::styled(document.priority.as_str(), default_style()),
        Span::raw("  "),
        Span::styled(document.priority_rag.symbol(), rag_style(document.priority_rag)),
    ]);

    let paragraph = Paragraph::new(vec![countdown, priority])
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Planner · Your Daily Command Center ", title_style())),
        );

    f.render_widget(paragraph, area);
}
