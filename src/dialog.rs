use crossterm::event::KeyCode;

use crate::components::reminder_form::ReminderFormState;
use crate::reminders::Notification;

/// Result of feeding one key to a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    Continue,
    Confirm(T),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

impl MessageKind {
    pub fn title(self) -> &'static str {
        match self {
            MessageKind::Info => " Done ",
            MessageKind::Warning => " Notice ",
            MessageKind::Error => " Error ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// A modal layer. The top of the dialog stack receives all input.
#[derive(Debug, Clone)]
pub enum Dialog {
    AddReminder(ReminderFormState),
    Message(Message),
    Alert(Notification),
}

/// Key handling shared by message boxes and alerts.
pub fn acknowledge(code: KeyCode) -> DialogOutcome<()> {
    match code {
        KeyCode::Enter | KeyCode::Char(' ') => DialogOutcome::Confirm(()),
        KeyCode::Esc => DialogOutcome::Cancel,
        _ => DialogOutcome::Continue,
    }
}
