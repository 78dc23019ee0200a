use crate::app::AppState;
use crate::domain::Focus;
use crate::ui::styles::{
    border_style, default_style, focused_border_style, hint_style, rag_style, selected_style, title_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Tabs},
    Frame,
};

/// Render module tabs and the to-do list of the selected module
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let titles: Vec<Line> = app
        .document
        .modules
        .iter()
        .map(|m| {
            if m.name == crate::domain::HOME_MODULE {
                Line::from(format!("🏠 {}", m.name))
            } else {
                Line::from(m.name.clone())
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.selected_module)
        .style(default_style())
        .highlight_style(selected_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Modules ", title_style())),
        );
    f.render_widget(tabs, chunks[0]);

    let focused = app.focus == Focus::Tasks;
    let border = if focused { focused_border_style() } else { border_style() };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(" ✅ To-Do List ", title_style()));

    let tasks = app
        .document
        .modules
        .get(app.selected_module)
        .map(|m| m.tasks.as_slice())
        .unwrap_or_default();

    if tasks.is_empty() {
        let empty = List::new(vec![ListItem::new(Line::from(Span::styled(
            "  No tasks yet. Press 'a' to add one.",
            hint_style(),
        )))])
        .block(block);
        f.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", task.status.symbol()), rag_style(task.status)),
                Span::styled(task.text.as_str(), default_style()),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.selected_task));
    }

    let list = List::new(items).block(block).highlight_style(selected_style());
    f.render_stateful_widget(list, chunks[1], &mut state);
}
