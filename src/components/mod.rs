pub mod clock;
pub mod help;
pub mod message_box;
pub mod month_view;
pub mod reminder_form;
pub mod reminder_list;
pub mod status_bar;

pub use clock::Clock;
pub use message_box::MessageBox;
pub use month_view::MonthView;
pub use reminder_form::ReminderForm;
pub use reminder_list::ReminderList;
pub use status_bar::StatusBar;
