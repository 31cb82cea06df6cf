use ratatui::style::Color;

use crate::core::config::Theme;

/// Colours used across the day view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub body: Color,
    /// Header, help bar, borders and list markers.
    pub muted: Color,
    pub heading: Color,
    /// Links and help-bar key labels.
    pub accent: Color,
    pub code_fg: Color,
    pub code_bg: Color,
    /// syntect theme used for fenced code blocks.
    pub syntax_theme: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                body: Color::Gray,
                // Matches the classic #999999 header grey
                muted: Color::Rgb(0x99, 0x99, 0x99),
                heading: Color::LightMagenta,
                accent: Color::Cyan,
                code_fg: Color::White,
                code_bg: Color::DarkGray,
                syntax_theme: "base16-ocean.dark",
            },
            Theme::Light => Self {
                body: Color::Black,
                muted: Color::Rgb(0x66, 0x66, 0x66),
                heading: Color::Magenta,
                accent: Color::Blue,
                code_fg: Color::Black,
                code_bg: Color::Rgb(0xe8, 0xe8, 0xe8),
                syntax_theme: "InspiredGitHub",
            },
        }
    }
}
