use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time;

/// Stable identity of a reminder for the lifetime of the process.
///
/// Ids are not persisted; each load assigns fresh ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderEntry {
    #[serde(skip, default = "EntryId::generate")]
    pub id: EntryId,
    #[serde(with = "time::hhmm")]
    pub time: NaiveTime,
    pub description: String,
}

impl ReminderEntry {
    pub fn new(time: NaiveTime, description: impl Into<String>) -> Self {
        Self {
            id: EntryId::generate(),
            time,
            description: description.into(),
        }
    }

    /// `HH:MM - description`, as shown in the day list.
    pub fn display_line(&self) -> String {
        format!("{} - {}", time::format_hhmm(self.time), self.description)
    }
}
