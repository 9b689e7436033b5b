use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::reminders::ReminderEntry;
use crate::theme;

pub struct ReminderList;

impl ReminderList {
    /// Render `entries` (already time-sorted) as `HH:MM - description` rows.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        date: NaiveDate,
        entries: &[ReminderEntry],
        selected: Option<usize>,
        focused: bool,
    ) {
        let t = theme::current();
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" {} ", date.format("%A, %B %d, %Y"))
        } else {
            format!(" {} ", date.format("%Y-%m-%d"))
        };
        let n = entries.len();
        let count = if n == 0 {
            String::new()
        } else {
            format!(" {} reminder{} ", n, if n == 1 { "" } else { "s" })
        };

        let block = Block::default()
            .title(title)
            .title_style(t.header)
            .title_bottom(Line::from(Span::styled(count, t.dim)))
            .borders(Borders::ALL)
            .border_style(if focused { t.focus } else { t.border });

        if entries.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No reminders. Press n to add one.").style(t.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = entries
            .iter()
            .map(|entry| ListItem::new(truncate(&entry.display_line(), inner_w)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(if focused { t.selected } else { t.highlight })
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(selected);
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("09:00 - 团队会议讨论", 12), "09:00 - 团...");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
