use chrono::NaiveDateTime;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme;

pub struct Clock;

impl Clock {
    pub fn render(frame: &mut Frame, area: Rect, now: NaiveDateTime, pending: usize) {
        let t = theme::current();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border);

        let mut lines = vec![Line::from(Span::styled(now.format("%H:%M:%S").to_string(), t.clock))];
        if area.height > 3 {
            let label = match pending {
                0 => "no more reminders today".to_string(),
                1 => "1 reminder left today".to_string(),
                n => format!("{} reminders left today", n),
            };
            lines.push(Line::from(Span::styled(label, t.dim)));
        }

        let para = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(para, area);
    }
}
