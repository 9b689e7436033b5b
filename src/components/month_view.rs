use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::DisplayedMonth;
use crate::theme;

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const CELL_WIDTH: usize = 5;

pub type Week = [Option<u32>; 7];

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        month: DisplayedMonth,
        selected_date: NaiveDate,
        today: NaiveDate,
        days_with_reminders: &HashSet<u32>,
        focused: bool,
    ) {
        let t = theme::current();
        let title = format!(" \u{25c0} {} {} \u{25b6} ", month_name(month.month), month.year);

        let block = Block::default()
            .title(title)
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(if focused { t.focus } else { t.border });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header = Line::from(
            DAY_NAMES
                .iter()
                .enumerate()
                .map(|(col, d)| {
                    let style = if is_weekend_column(col) {
                        t.weekend.add_modifier(Modifier::BOLD)
                    } else {
                        t.header
                    };
                    Span::styled(format!("{:^width$}", d, width = CELL_WIDTH), style)
                })
                .collect::<Vec<_>>(),
        );

        let weeks: Vec<Line> = month_grid(month.year, month.month)
            .iter()
            .map(|week| {
                let cells: Vec<Span> = week
                    .iter()
                    .enumerate()
                    .map(|(col, day)| {
                        let Some(day) = *day else {
                            return Span::raw(" ".repeat(CELL_WIDTH));
                        };
                        let Some(date) = month.date(day) else {
                            return Span::raw(" ".repeat(CELL_WIDTH));
                        };
                        let marker = if days_with_reminders.contains(&day) {
                            '*'
                        } else {
                            ' '
                        };
                        let text = format!(" {:>2}{} ", day, marker);
                        Span::styled(text, day_style(date, col, selected_date, today))
                    })
                    .collect();
                Line::from(cells)
            })
            .collect();

        let mut constraints = vec![Constraint::Length(1)]; // header
        constraints.extend(weeks.iter().map(|_| Constraint::Length(1)));
        constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);
        for (i, week) in weeks.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(week), rows[i + 1]);
        }
    }
}

fn day_style(date: NaiveDate, col: usize, selected: NaiveDate, today: NaiveDate) -> Style {
    let t = theme::current();
    if date == today && date == selected {
        t.today.patch(t.selected).add_modifier(Modifier::BOLD)
    } else if date == selected {
        t.selected
    } else if date == today {
        t.today
    } else if is_weekend_column(col) {
        t.weekend
    } else {
        Style::default()
    }
}

fn is_weekend_column(col: usize) -> bool {
    col >= 5
}

/// Weeks of the month, Monday first. Cells outside the month are `None`.
pub fn month_grid(year: i32, month: u32) -> Vec<Week> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let offset = first.weekday().num_days_from_monday() as usize;
    let days = days_in_month(year, month);

    let mut weeks = Vec::new();
    let mut week: Week = [None; 7];
    for day in 1..=days {
        let col = (offset + day as usize - 1) % 7;
        week[col] = Some(day);
        if col == 6 {
            weeks.push(week);
            week = [None; 7];
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
