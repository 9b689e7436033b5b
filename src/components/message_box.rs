use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::dialog::{Message, MessageKind};
use crate::reminders::{time, Notification};
use crate::theme;

pub struct MessageBox;

impl MessageBox {
    pub fn render(frame: &mut Frame, area: Rect, message: &Message) {
        let color = match message.kind {
            MessageKind::Info => Color::Green,
            MessageKind::Warning => Color::Yellow,
            MessageKind::Error => Color::Red,
        };
        let lines = vec![
            Line::from(message.text.clone()),
            Line::from(""),
            Line::from(Span::styled("Press Enter to continue", theme::current().dim)),
        ];
        render_popup(frame, area, message.kind.title(), color, lines);
    }

    pub fn render_alert(frame: &mut Frame, area: Rect, alert: &Notification) {
        let t = theme::current();
        let lines = vec![
            Line::from(vec![
                Span::styled("Reminder: ", t.alert),
                Span::raw(alert.description.clone()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Scheduled: ", t.dim),
                Span::raw(format!(
                    "{} {}",
                    alert.date.format("%Y-%m-%d"),
                    time::format_hhmm(alert.time)
                )),
            ]),
            Line::from(""),
            Line::from(Span::styled("Press Enter to dismiss", t.dim)),
        ];
        render_popup(frame, area, " \u{23f0} Reminder ", Color::Yellow, lines);
    }
}

fn render_popup(frame: &mut Frame, area: Rect, title: &str, color: Color, lines: Vec<Line>) {
    let popup_w = area.width.clamp(30, 56);
    let popup_h = area.height.clamp(7, 9);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(title.to_string())
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(para, popup_area);
}
