use std::path::PathBuf;

use chrono::NaiveDate;

/// Errors raised by the reminder store.
///
/// The first group are user mistakes that the UI reports and otherwise
/// ignores; the rest are persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("time must be a 24-hour HH:MM value, got {0:?}")]
    InvalidTime(String),

    #[error("description must not be empty")]
    EmptyDescription,

    #[error("select a reminder to delete first")]
    NoSelection,

    #[error("no reminder at row {row} on {date}")]
    RowOutOfRange { date: NaiveDate, row: usize },

    #[error("reminder not found on {date}")]
    NotFound { date: NaiveDate },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed reminder file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode reminders: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidTime(_)
                | StoreError::EmptyDescription
                | StoreError::NoSelection
                | StoreError::RowOutOfRange { .. }
                | StoreError::NotFound { .. }
        )
    }
}
