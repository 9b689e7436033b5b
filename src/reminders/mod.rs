pub mod entry;
pub mod error;
pub mod scheduler;
pub mod store;
pub mod time;

pub use entry::{EntryId, ReminderEntry};
pub use error::StoreError;
pub use scheduler::{Notification, ReminderClock};
pub use store::EventStore;
