//! UI theme: keep colors in one place instead of scattered through render code.

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct UiTheme {
    pub focus_border: Color,
    pub inactive_border: Color,
    pub accent_fg: Color,
    pub header_fg: Color,
    pub fg: Color,
    pub muted_fg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub line_number_fg: Color,
    pub info_fg: Color,
    pub warning_fg: Color,
    pub error_fg: Color,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            focus_border: Color::Cyan,
            inactive_border: Color::DarkGray,
            accent_fg: Color::Yellow,
            header_fg: Color::Cyan,
            fg: Color::White,
            muted_fg: Color::DarkGray,
            selected_bg: Color::DarkGray,
            selected_fg: Color::White,
            line_number_fg: Color::DarkGray,
            info_fg: Color::Green,
            warning_fg: Color::Yellow,
            error_fg: Color::Red,
        }
    }
}
