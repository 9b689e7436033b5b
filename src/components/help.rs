use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

const CALENDAR_KEYS: &[(&str, &str)] = &[
    ("h/l \u{2190}/\u{2192}", "Previous/next day"),
    ("j/k \u{2193}/\u{2191}", "Next/previous week"),
    ("[ / ]", "Previous/next month"),
    ("t", "Jump to today"),
];

const LIST_KEYS: &[(&str, &str)] = &[
    ("Tab", "Switch calendar / list focus"),
    ("j/k", "Move list highlight"),
    ("n", "Add reminder to selected date"),
    ("d", "Delete highlighted reminder"),
];

const GENERAL_KEYS: &[(&str, &str)] = &[("Enter / Esc", "Confirm / close popup"), ("q", "Quit")];

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    ("Calendar", CALENDAR_KEYS),
    ("Reminders", LIST_KEYS),
    ("General", GENERAL_KEYS),
];

pub fn render_help(frame: &mut Frame, area: Rect) {
    let t = theme::current();
    let popup_w = area.width.clamp(30, 52);
    let popup_h = area.height.clamp(12, 20);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut lines = Vec::new();
    for (i, (section, keys)) in BINDINGS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(*section, section_style)));
        for (key, desc) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", key), key_style),
                Span::raw(*desc),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Press ? or Esc to close", t.dim)));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(para, popup_area);
}
