use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme (default unless [`init`] ran first).
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

/// Install the theme described by the config file. Only the first call has
/// any effect.
pub fn init(config: &ThemeConfig) -> &'static Theme {
    THEME.get_or_init(|| config.clone().into_theme())
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub today: Style,
    pub day_label: Style,
    pub hour_label: Style,
    pub event: Style,
    pub on_air: Style,
    pub selected: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            day_label: Style::default().fg(Color::White),
            hour_label: Style::default().fg(Color::Gray),
            event: Style::default().fg(Color::Black).bg(Color::Blue),
            on_air: Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            error: Style::default().fg(Color::White).bg(Color::Red),
        }
    }
}

impl Theme {
    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            header: Style::default().fg(Color::Rgb(248, 248, 242)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(Color::Rgb(68, 71, 90)),
            status: Style::default()
                .fg(Color::Rgb(248, 248, 242))
                .bg(Color::Rgb(68, 71, 90)),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(189, 147, 249)), // purple
            day_label: Style::default().fg(Color::Rgb(248, 248, 242)),
            hour_label: Style::default().fg(Color::Rgb(98, 114, 164)),
            event: Style::default().fg(Color::Black).bg(Color::Rgb(139, 233, 253)), // cyan
            on_air: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(255, 85, 85))
                .add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(80, 250, 123)),
            error: Style::default().fg(Color::Black).bg(Color::Rgb(255, 85, 85)),
        }
    }

    fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            header: Style::default().fg(Color::Rgb(235, 219, 178)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            status: Style::default()
                .fg(Color::Rgb(235, 219, 178))
                .bg(Color::Rgb(80, 73, 69)),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(250, 189, 47)), // yellow
            day_label: Style::default().fg(Color::Rgb(235, 219, 178)),
            hour_label: Style::default().fg(Color::Rgb(146, 131, 116)),
            event: Style::default().fg(Color::Black).bg(Color::Rgb(131, 165, 152)), // aqua
            on_air: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(251, 73, 52))
                .add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(184, 187, 38)),
            error: Style::default().fg(Color::Black).bg(Color::Rgb(251, 73, 52)),
        }
    }

    fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            header: Style::default().fg(Color::Rgb(229, 233, 240)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(Color::Rgb(67, 76, 94)),
            status: Style::default()
                .fg(Color::Rgb(229, 233, 240))
                .bg(Color::Rgb(67, 76, 94)),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(235, 203, 139)), // yellow
            day_label: Style::default().fg(Color::Rgb(229, 233, 240)),
            hour_label: Style::default().fg(Color::Rgb(76, 86, 106)),
            event: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)), // frost
            on_air: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(191, 97, 106))
                .add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(163, 190, 140)),
            error: Style::default().fg(Color::Black).bg(Color::Rgb(191, 97, 106)),
        }
    }
}

// ── TOML config types ──

/// `[theme]` table of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub today_bg: Option<String>,
    pub event_fg: Option<String>,
    pub event_bg: Option<String>,
    pub on_air_bg: Option<String>,
    pub selected_bg: Option<String>,
}

impl ThemeConfig {
    pub fn into_theme(self) -> Theme {
        // Start from preset or default
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        // Override individual colors
        if let Some(c) = self.header_fg.as_deref().and_then(parse_color) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = self.dim_fg.as_deref().and_then(parse_color) {
            theme.dim = theme.dim.fg(c);
            theme.hour_label = theme.hour_label.fg(c);
        }
        if let Some(c) = self.border_fg.as_deref().and_then(parse_color) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = self.status_fg.as_deref().and_then(parse_color) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = self.today_bg.as_deref().and_then(parse_color) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = self.event_fg.as_deref().and_then(parse_color) {
            theme.event = theme.event.fg(c);
        }
        if let Some(c) = self.event_bg.as_deref().and_then(parse_color) {
            theme.event = theme.event.bg(c);
        }
        if let Some(c) = self.on_air_bg.as_deref().and_then(parse_color) {
            theme.on_air = theme.on_air.bg(c);
        }
        if let Some(c) = self.selected_bg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.bg(c);
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}
