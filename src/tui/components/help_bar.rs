//! # HelpBar Component
//!
//! One line of key hints at the bottom of the screen:
//!
//! ```text
//! h prev day • l next day • t today • e edit • r reload • q quit
//! ```
//!
//! On narrow terminals trailing hints are dropped and replaced with `…`
//! rather than wrapping.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::keymap::KeyMap;
use crate::tui::theme::Palette;

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "…";

pub struct HelpBar<'a> {
    pub keymap: &'a KeyMap,
    pub palette: &'a Palette,
}

impl<'a> HelpBar<'a> {
    pub fn new(keymap: &'a KeyMap, palette: &'a Palette) -> Self {
        Self { keymap, palette }
    }

    /// Build the hint line, fitting it into `width` columns.
    pub fn line(&self, width: u16) -> Line<'static> {
        let width = width as usize;
        let key_style = Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.palette.muted);

        let bindings = self.keymap.short_help();
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut used = 0;

        for (i, binding) in bindings.iter().enumerate() {
            let sep = if i == 0 { "" } else { SEPARATOR };
            let item_width = sep.width() + binding.label.width() + 1 + binding.description.width();
            // Leave room for the ellipsis unless this is the last hint
            let reserve = if i + 1 < bindings.len() {
                SEPARATOR.width() + ELLIPSIS.width()
            } else {
                0
            };
            if used + item_width + reserve > width {
                let tail = if i == 0 { ELLIPSIS.to_string() } else { format!(" {ELLIPSIS}") };
                if used + tail.width() <= width {
                    spans.push(Span::styled(tail, desc_style));
                }
                break;
            }
            if !sep.is_empty() {
                spans.push(Span::styled(sep, desc_style));
            }
            spans.push(Span::styled(binding.label, key_style));
            spans.push(Span::styled(format!(" {}", binding.description), desc_style));
            used += item_width;
        }

        Line::from(spans)
    }
}

impl<'a> Component for HelpBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.line(area.width)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Theme;
    use crate::tui::keymap::DEFAULT_KEYMAP;

    fn text_at(width: u16) -> String {
        let palette = Palette::for_theme(Theme::Dark);
        let bar = HelpBar::new(&DEFAULT_KEYMAP, &palette);
        bar.line(width)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect()
    }

    #[test]
    fn test_full_line_when_wide() {
        assert_eq!(
            text_at(120),
            "h prev day • l next day • t today • e edit • r reload • q quit"
        );
    }

    #[test]
    fn test_narrow_line_truncates_with_ellipsis() {
        let text = text_at(30);
        assert!(text.starts_with("h prev day • l next day"), "{text}");
        assert!(text.ends_with('…'), "{text}");
        assert!(text.width() <= 30);
    }

    #[test]
    fn test_never_exceeds_width() {
        for width in 0..80 {
            assert!(text_at(width).width() <= width as usize, "width {width}");
        }
    }

    #[test]
    fn test_keys_are_highlighted() {
        let palette = Palette::for_theme(Theme::Dark);
        let line = HelpBar::new(&DEFAULT_KEYMAP, &palette).line(120);
        let key = line.spans.iter().find(|s| s.content == "e").unwrap();
        assert_eq!(key.style.fg, Some(palette.accent));
        assert!(key.style.add_modifier.contains(Modifier::BOLD));
    }
}
