use chrono::{NaiveDate, NaiveTime};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::dialog::DialogOutcome;
use crate::reminders::time::{self, TIME_FORMAT};
use crate::reminders::StoreError;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Description,
    Time,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Description => FormField::Time,
            FormField::Time => FormField::Description,
        }
    }
}

/// A validated add request, ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDraft {
    pub date: NaiveDate,
    pub time: String,
    pub description: String,
}

/// Input state of the add dialog. The date is fixed at open time.
#[derive(Debug, Clone)]
pub struct ReminderFormState {
    pub date: NaiveDate,
    pub description: String,
    pub time: String,
    pub active_field: FormField,
    pub error: Option<String>,
}

impl ReminderFormState {
    pub fn new(date: NaiveDate, now: NaiveTime) -> Self {
        Self {
            date,
            description: String::new(),
            time: now.format(TIME_FORMAT).to_string(),
            active_field: FormField::Description,
            error: None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            FormField::Description => self.description.push(c),
            FormField::Time => self.time.push(c),
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            FormField::Description => {
                self.description.pop();
            }
            FormField::Time => {
                self.time.pop();
            }
        }
        self.error = None;
    }

    pub fn validate(&self) -> Result<ReminderDraft, StoreError> {
        if self.description.trim().is_empty() {
            return Err(StoreError::EmptyDescription);
        }
        time::parse_hhmm(&self.time)?;
        Ok(ReminderDraft {
            date: self.date,
            time: self.time.clone(),
            description: self.description.clone(),
        })
    }

    pub fn handle_key(&mut self, code: KeyCode) -> DialogOutcome<ReminderDraft> {
        match code {
            KeyCode::Esc => return DialogOutcome::Cancel,
            KeyCode::Enter => match self.validate() {
                Ok(draft) => return DialogOutcome::Confirm(draft),
                Err(err) => self.error = Some(err.to_string()),
            },
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.active_field = self.active_field.next();
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) => self.input_char(c),
            _ => {}
        }
        DialogOutcome::Continue
    }
}

pub struct ReminderForm;

impl ReminderForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &ReminderFormState) {
        let t = theme::current();

        // Center the form popup
        let form_w = area.width.clamp(30, 50);
        let form_h = area.height.clamp(9, 10);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h).intersection(area);

        frame.render_widget(Clear, form_area);

        let block = Block::default()
            .title(" New Reminder ")
            .title_style(t.header.fg(ratatui::style::Color::Green))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::Green));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // date
            Constraint::Length(1), // description
            Constraint::Length(1), // time
            Constraint::Length(1), // spacer
            Constraint::Length(1), // error
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let date = state.date.format("%Y-%m-%d").to_string();
        render_field(frame, rows[0], "Date:", &date, false);
        render_field(
            frame,
            rows[1],
            "What:",
            &state.description,
            state.active_field == FormField::Description,
        );
        render_field(
            frame,
            rows[2],
            "Time:",
            &state.time,
            state.active_field == FormField::Time,
        );

        if let Some(ref err) = state.error {
            frame.render_widget(Paragraph::new(Span::styled(err.as_str(), t.error)), rows[4]);
        }

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", t.dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", t.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", t.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[5]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let t = theme::current();
    let cursor = if active { "_" } else { "" };
    let style = if active { t.focus } else { Style::default() };

    let line = Line::from(vec![
        Span::styled(format!("{:<7}", label), t.dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ReminderFormState {
        ReminderFormState::new(
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            NaiveTime::from_hms_opt(8, 5, 42).unwrap(),
        )
    }

    fn type_str(form: &mut ReminderFormState, s: &str) {
        for c in s.chars() {
            form.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn prefills_current_minute() {
        let form = form();
        assert_eq!(form.time, "08:05");
        assert_eq!(form.active_field, FormField::Description);
    }

    #[test]
    fn enter_with_valid_input_confirms() {
        let mut form = form();
        type_str(&mut form, "Team sync");
        form.handle_key(KeyCode::Tab);
        for _ in 0..5 {
            form.handle_key(KeyCode::Backspace);
        }
        type_str(&mut form, "14:30");

        assert_eq!(
            form.handle_key(KeyCode::Enter),
            DialogOutcome::Confirm(ReminderDraft {
                date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                time: "14:30".to_string(),
                description: "Team sync".to_string(),
            })
        );
    }

    #[test]
    fn enter_with_empty_description_stays_open() {
        let mut form = form();
        assert_eq!(form.handle_key(KeyCode::Enter), DialogOutcome::Continue);
        assert!(form.error.is_some());

        type_str(&mut form, "x");
        assert!(form.error.is_none());
    }

    #[test]
    fn enter_with_bad_time_stays_open() {
        let mut form = form();
        type_str(&mut form, "Standup");
        form.handle_key(KeyCode::Tab);
        for _ in 0..5 {
            form.handle_key(KeyCode::Backspace);
        }
        type_str(&mut form, "9:30");

        assert_eq!(form.time, "9:30");
        assert_eq!(form.handle_key(KeyCode::Enter), DialogOutcome::Continue);
        assert!(form.error.as_deref().unwrap().contains("HH:MM"));
    }

    #[test]
    fn surrounding_whitespace_is_kept() {
        let mut padded = form();
        type_str(&mut padded, " Standup  ");
        match padded.handle_key(KeyCode::Enter) {
            DialogOutcome::Confirm(draft) => assert_eq!(draft.description, " Standup  "),
            other => panic!("expected confirm, got {other:?}"),
        }

        let mut blank = form();
        type_str(&mut blank, "   ");
        assert_eq!(blank.handle_key(KeyCode::Enter), DialogOutcome::Continue);
    }

    #[test]
    fn escape_cancels() {
        let mut form = form();
        type_str(&mut form, "draft");
        assert_eq!(form.handle_key(KeyCode::Esc), DialogOutcome::Cancel);
    }
}
