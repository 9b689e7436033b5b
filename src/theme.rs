use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme. Falls back to the default if [`init`] never ran.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

/// Install the theme described by the `[theme]` config table.
pub fn init(config: &ThemeConfig) {
    let _ = THEME.set(config.to_theme());
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub weekend: Style,
    pub dim: Style,
    pub border: Style,
    pub focus: Style,
    pub status: Style,
    pub highlight: Style,
    pub clock: Style,
    pub alert: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            weekend: Style::default().fg(Color::Red),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            focus: Style::default().fg(Color::Cyan),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            highlight: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            clock: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            alert: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self {
                today: Style::default().fg(Color::Black).bg(Color::Rgb(189, 147, 249)),
                selected: Style::default().fg(Color::Black).bg(Color::Rgb(139, 233, 253)),
                header: Style::default().fg(Color::Rgb(248, 248, 242)).add_modifier(Modifier::BOLD),
                weekend: Style::default().fg(Color::Rgb(255, 121, 198)),
                dim: Style::default().fg(Color::Rgb(98, 114, 164)),
                border: Style::default().fg(Color::Rgb(68, 71, 90)),
                status: Style::default()
                    .fg(Color::Rgb(248, 248, 242))
                    .bg(Color::Rgb(68, 71, 90)),
                ..Self::default()
            },
            "gruvbox" => Self {
                today: Style::default().fg(Color::Black).bg(Color::Rgb(250, 189, 47)),
                selected: Style::default().fg(Color::Black).bg(Color::Rgb(131, 165, 152)),
                header: Style::default().fg(Color::Rgb(235, 219, 178)).add_modifier(Modifier::BOLD),
                weekend: Style::default().fg(Color::Rgb(251, 73, 52)),
                dim: Style::default().fg(Color::Rgb(146, 131, 116)),
                border: Style::default().fg(Color::Rgb(102, 92, 84)),
                status: Style::default()
                    .fg(Color::Rgb(235, 219, 178))
                    .bg(Color::Rgb(80, 73, 69)),
                ..Self::default()
            },
            "nord" => Self {
                today: Style::default().fg(Color::Black).bg(Color::Rgb(235, 203, 139)),
                selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)),
                header: Style::default().fg(Color::Rgb(229, 233, 240)).add_modifier(Modifier::BOLD),
                weekend: Style::default().fg(Color::Rgb(191, 97, 106)),
                dim: Style::default().fg(Color::Rgb(76, 86, 106)),
                border: Style::default().fg(Color::Rgb(67, 76, 94)),
                status: Style::default()
                    .fg(Color::Rgb(229, 233, 240))
                    .bg(Color::Rgb(67, 76, 94)),
                ..Self::default()
            },
            _ => Self::default(),
        }
    }
}

// ── [theme] config table ──

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub weekend_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub clock_fg: Option<String>,
}

impl ThemeConfig {
    pub fn to_theme(&self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let fg = |style: &mut Style, value: &Option<String>| {
            if let Some(c) = value.as_deref().and_then(parse_color) {
                *style = style.fg(c);
            }
        };
        let bg = |style: &mut Style, value: &Option<String>| {
            if let Some(c) = value.as_deref().and_then(parse_color) {
                *style = style.bg(c);
            }
        };

        fg(&mut theme.today, &self.today_fg);
        bg(&mut theme.today, &self.today_bg);
        fg(&mut theme.selected, &self.selected_fg);
        bg(&mut theme.selected, &self.selected_bg);
        fg(&mut theme.header, &self.header_fg);
        fg(&mut theme.weekend, &self.weekend_fg);
        fg(&mut theme.dim, &self.dim_fg);
        fg(&mut theme.border, &self.border_fg);
        fg(&mut theme.status, &self.status_fg);
        bg(&mut theme.status, &self.status_bg);
        fg(&mut theme.clock, &self.clock_fg);

        theme
    }
}

/// Parse a color string: hex "#rrggbb", an index, or a named color.
fn parse_color(s: &str) -> Option<Color> {
    s.trim().parse().ok()
}
