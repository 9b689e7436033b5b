mod app;
mod components;
mod config;
mod dialog;
mod event;
mod logging;
mod reminders;
mod theme;
mod tui;

use std::time::Duration;

use app::App;
use chrono::Local;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::event::KeyModifiers;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;
use tracing::info;

use config::Config;
use dialog::Dialog;
use reminders::EventStore;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const MONTH_WIDTH: u16 = 37;

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    let _log_guard = logging::init(&config.logging)?;
    theme::init(&config.theme);

    let store = EventStore::load(&config.storage.path)
        .wrap_err("could not load reminders; fix or move the file and try again")?;
    let mut app = App::new(store, Local::now().naive_local());

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    info!("exiting");
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| draw(frame, app))?;

        if let Some(key) = event::next_key_event(POLL_INTERVAL)? {
            app.handle_key(key.code, key.modifiers.contains(KeyModifiers::CONTROL));
        }

        app.tick(Local::now().naive_local());
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: content + status bar
    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
    let content_area = layout[0];

    let (month_area, side_area) = if content_area.width < MONTH_WIDTH + 20 {
        let parts =
            Layout::vertical([Constraint::Length(9), Constraint::Min(3)]).split(content_area);
        (parts[0], parts[1])
    } else {
        let parts = Layout::horizontal([Constraint::Length(MONTH_WIDTH), Constraint::Min(20)])
            .split(content_area);
        (parts[0], parts[1])
    };

    components::MonthView::render(
        frame,
        month_area,
        app.displayed_month,
        app.selected_date,
        app.today,
        &app.days_with_reminders,
        app.focus == app::Focus::Calendar,
    );
    render_side(frame, side_area, app);

    if app.show_help {
        components::help::render_help(frame, area);
    }

    // Bottom of the stack first so the active dialog ends up on top.
    for dialog in &app.dialogs {
        match dialog {
            Dialog::AddReminder(form) => components::ReminderForm::render(frame, area, form),
            Dialog::Message(message) => components::MessageBox::render(frame, area, message),
            Dialog::Alert(alert) => components::MessageBox::render_alert(frame, area, alert),
        }
    }

    components::StatusBar::render(frame, layout[1], app);
}

fn render_side(frame: &mut Frame, area: Rect, app: &App) {
    let clock_h = if area.height >= 12 { 4 } else { 3 };
    let parts = Layout::vertical([Constraint::Length(clock_h), Constraint::Min(3)]).split(area);

    components::Clock::render(frame, parts[0], app.now, app.pending_reminders());
    components::ReminderList::render(
        frame,
        parts[1],
        app.selected_date,
        &app.day_entries,
        app.list_selected,
        app.focus == app::Focus::List,
    );
}
