use crate::app::AppState;
use crate::ui::styles::{error_style, hint_style, info_style};
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" ↑/↓ select   "),
        Span::raw("←/→ module   "),
        Span::raw("Tab pane   "),
        Span::raw("Enter status/edit   "),
        Span::raw("a add   "),
        Span::raw("x delete   "),
        Span::raw("M/D module   "),
        Span::raw("p/r priority   "),
        Span::raw("t deadline   "),
        Span::raw("w wake   "),
        Span::raw("s/z/o pomodoro   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the flash message line, if any
pub fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(flash) = &app.flash {
        let style = if flash.is_error { error_style() } else { info_style() };
        let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {}", flash.message), style)));
        f.render_widget(paragraph, area);
    }
}
