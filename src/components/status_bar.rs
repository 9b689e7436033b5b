use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Focus};
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let t = theme::current();
        let w = area.width as usize;

        let focus_str = match app.focus {
            Focus::Calendar => "[Calendar]",
            Focus::List => "[Reminders]",
        };

        let right_text = if w >= 80 {
            " hjkl:Day [/]:Month t:Today Tab:Focus n:New d:Del ?:Help q:Quit ".to_string()
        } else if w >= 50 {
            " [/]:Month Tab:Focus n:New d:Del q:Quit ".to_string()
        } else {
            " ?:Help q:Quit ".to_string()
        };

        let left = format!(" {} ", focus_str);
        let padding = " ".repeat(w.saturating_sub(left.len() + right_text.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, t.status),
            Span::styled(padding, t.status),
            Span::styled(right_text, t.status),
        ]);

        frame.render_widget(Paragraph::new(line).style(t.status), area);
    }
}
