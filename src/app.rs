use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use crossterm::event::KeyCode;
use tracing::{debug, error, warn};

use crate::components::month_view::days_in_month;
use crate::components::reminder_form::{ReminderDraft, ReminderFormState};
use crate::dialog::{self, Dialog, DialogOutcome, Message, MessageKind};
use crate::reminders::{EventStore, ReminderClock, ReminderEntry, StoreError};

/// The month shown by the calendar grid, independent of the selected date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayedMonth {
    pub year: i32,
    pub month: u32,
}

impl DisplayedMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Calendar,
    List,
}

pub struct App {
    pub running: bool,
    pub displayed_month: DisplayedMonth,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub now: NaiveDateTime,
    pub focus: Focus,
    pub day_entries: Vec<ReminderEntry>,
    pub list_selected: Option<usize>,
    pub days_with_reminders: HashSet<u32>,
    pub dialogs: Vec<Dialog>,
    pub show_help: bool,
    store: EventStore,
    reminders: ReminderClock,
}

impl App {
    pub fn new(store: EventStore, now: NaiveDateTime) -> Self {
        let today = now.date();
        let reminders = ReminderClock::new(&store, now);

        let mut app = Self {
            running: true,
            displayed_month: DisplayedMonth::of(today),
            selected_date: today,
            today,
            now,
            focus: Focus::Calendar,
            day_entries: Vec::new(),
            list_selected: None,
            days_with_reminders: HashSet::new(),
            dialogs: Vec::new(),
            show_help: false,
            store,
            reminders,
        };
        app.refresh_month();
        app.refresh_day();
        app
    }

    /// One-second heartbeat: refresh the clock and raise due reminders.
    pub fn tick(&mut self, now: NaiveDateTime) {
        let same_second = now.date() == self.now.date()
            && now.num_seconds_from_midnight() == self.now.num_seconds_from_midnight();
        if same_second {
            return;
        }
        self.now = now;
        self.today = now.date();

        for notification in self.reminders.tick(&self.store, now) {
            self.dialogs.push(Dialog::Alert(notification));
        }
    }

    pub fn pending_reminders(&self) -> usize {
        self.reminders.pending(&self.store)
    }

    // ── calendar navigation ──

    pub fn next_month(&mut self) {
        self.displayed_month = self.displayed_month.next();
        self.refresh_month();
    }

    pub fn prev_month(&mut self) {
        self.displayed_month = self.displayed_month.prev();
        self.refresh_month();
    }

    pub fn next_day(&mut self) {
        self.move_selection(Duration::days(1));
    }

    pub fn prev_day(&mut self) {
        self.move_selection(Duration::days(-1));
    }

    pub fn next_week(&mut self) {
        self.move_selection(Duration::weeks(1));
    }

    pub fn prev_week(&mut self) {
        self.move_selection(Duration::weeks(-1));
    }

    pub fn go_to_today(&mut self) {
        self.select_date(self.today);
    }

    /// Select `date`, bringing its month into view.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        if !self.displayed_month.contains(date) {
            self.displayed_month = DisplayedMonth::of(date);
            self.refresh_month();
        }
        self.list_selected = None;
        self.refresh_day();
        if self.focus == Focus::List && !self.day_entries.is_empty() {
            self.list_selected = Some(0);
        }
    }

    fn move_selection(&mut self, delta: Duration) {
        if let Some(date) = self.selected_date.checked_add_signed(delta) {
            self.select_date(date);
        }
    }

    /// Move the selection into the displayed month when it is elsewhere.
    fn anchor_selection(&mut self) {
        if !self.displayed_month.contains(self.selected_date) {
            let m = self.displayed_month;
            let day = self.selected_date.day().min(days_in_month(m.year, m.month));
            if let Some(date) = m.date(day) {
                self.select_date(date);
            }
        }
    }

    // ── list ──

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Calendar => {
                if !self.day_entries.is_empty() && self.list_selected.is_none() {
                    self.list_selected = Some(0);
                }
                Focus::List
            }
            Focus::List => Focus::Calendar,
        };
    }

    pub fn list_down(&mut self) {
        if self.day_entries.is_empty() {
            return;
        }
        let last = self.day_entries.len() - 1;
        self.list_selected = Some(self.list_selected.map_or(0, |i| (i + 1).min(last)));
    }

    pub fn list_up(&mut self) {
        if self.day_entries.is_empty() {
            return;
        }
        self.list_selected = Some(self.list_selected.map_or(0, |i| i.saturating_sub(1)));
    }

    // ── add / delete ──

    pub fn open_add_dialog(&mut self) {
        let form = ReminderFormState::new(self.selected_date, self.now.time());
        self.dialogs.push(Dialog::AddReminder(form));
    }

    pub fn delete_selected(&mut self) {
        let Some(row) = self.list_selected.filter(|&row| row < self.day_entries.len()) else {
            self.push_message(MessageKind::Warning, StoreError::NoSelection.to_string());
            return;
        };

        match self.store.delete_at(self.selected_date, row) {
            Ok(entry) => {
                self.after_mutation();
                self.push_message(
                    MessageKind::Info,
                    format!("Deleted \"{}\".", entry.display_line()),
                );
            }
            Err(err) if err.is_validation() => {
                warn!(error = %err, "delete rejected");
                self.push_message(MessageKind::Warning, err.to_string());
            }
            Err(err) => {
                error!(error = %err, "failed to persist delete");
                self.push_message(MessageKind::Error, format!("Could not save reminders: {err}"));
            }
        }
    }

    fn submit(&mut self, draft: ReminderDraft) {
        match self.store.add(draft.date, &draft.time, &draft.description) {
            Ok(id) => {
                // Drop the form.
                self.dialogs.pop();
                self.reminders.forget(id);
                if let Some(entry) = self.store.get(draft.date, id) {
                    self.reminders.schedule(draft.date, entry, self.now);
                }
                self.after_mutation();
                self.push_message(MessageKind::Info, "Reminder added.");
            }
            Err(err) if err.is_validation() => {
                if let Some(Dialog::AddReminder(form)) = self.dialogs.last_mut() {
                    form.error = Some(err.to_string());
                }
            }
            Err(err) => {
                error!(error = %err, "failed to persist new reminder");
                // The form stays underneath so the input survives.
                self.push_message(MessageKind::Error, format!("Could not save reminder: {err}"));
            }
        }
    }

    fn after_mutation(&mut self) {
        self.refresh_month();
        self.refresh_day();
    }

    fn push_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.dialogs.push(Dialog::Message(Message {
            kind,
            text: text.into(),
        }));
    }

    fn refresh_month(&mut self) {
        let m = self.displayed_month;
        self.days_with_reminders = self.store.days_with_reminders(m.year, m.month);
    }

    fn refresh_day(&mut self) {
        self.day_entries = self.store.list_for(self.selected_date);
        self.list_selected = match self.list_selected {
            _ if self.day_entries.is_empty() => None,
            Some(i) => Some(i.min(self.day_entries.len() - 1)),
            None => None,
        };
    }

    // ── input ──

    pub fn handle_key(&mut self, code: KeyCode, ctrl: bool) {
        if !self.dialogs.is_empty() {
            self.handle_dialog_key(code);
            return;
        }

        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('c') if ctrl => self.running = false,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::Char('[') => {
                self.prev_month();
                self.anchor_selection();
            }
            KeyCode::Char(']') => {
                self.next_month();
                self.anchor_selection();
            }
            KeyCode::Char('t') => self.go_to_today(),
            KeyCode::Char('n') => self.open_add_dialog(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Left | KeyCode::Char('h') => self.prev_day(),
            KeyCode::Right | KeyCode::Char('l') => self.next_day(),
            KeyCode::Up | KeyCode::Char('k') => match self.focus {
                Focus::Calendar => self.prev_week(),
                Focus::List => self.list_up(),
            },
            KeyCode::Down | KeyCode::Char('j') => match self.focus {
                Focus::Calendar => self.next_week(),
                Focus::List => self.list_down(),
            },
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, code: KeyCode) {
        enum Step {
            Keep,
            Close,
            Submit(ReminderDraft),
        }

        let step = match self.dialogs.last_mut() {
            None => return,
            Some(Dialog::AddReminder(form)) => match form.handle_key(code) {
                DialogOutcome::Continue => Step::Keep,
                DialogOutcome::Cancel => Step::Close,
                DialogOutcome::Confirm(draft) => Step::Submit(draft),
            },
            Some(Dialog::Message(_) | Dialog::Alert(_)) => match dialog::acknowledge(code) {
                DialogOutcome::Continue => Step::Keep,
                DialogOutcome::Confirm(()) | DialogOutcome::Cancel => Step::Close,
            },
        };

        match step {
            Step::Keep => {}
            Step::Close => {
                if let Some(Dialog::Alert(alert)) = self.dialogs.pop() {
                    debug!(id = %alert.id, "reminder acknowledged");
                }
            }
            Step::Submit(draft) => self.submit(draft),
        }
    }
}
