//! # DateHeader Component
//!
//! Centred banner naming the day being shown:
//!
//! ```text
//!
//!                 2024-01-15 · Monday
//!
//! ```
//!
//! Purely presentational: it receives the date and colours as props and
//! keeps no state. A blank row above and below separates it from the
//! terminal edge and the note body.

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::notes::DATE_FORMAT;
use crate::tui::component::Component;

/// Rows the header occupies, padding included.
pub const HEADER_HEIGHT: u16 = 3;

pub struct DateHeader {
    pub date: NaiveDate,
    pub color: Color,
}

impl DateHeader {
    pub fn new(date: NaiveDate, color: Color) -> Self {
        Self { date, color }
    }

    pub fn title(&self) -> Line<'static> {
        let style = Style::default().fg(self.color);
        Line::from(vec![
            Span::styled(
                self.date.format(DATE_FORMAT).to_string(),
                style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" · {}", self.date.format("%A")), style),
        ])
    }
}

impl Component for DateHeader {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(self.title())
            .alignment(Alignment::Center)
            .block(Block::new().padding(Padding::vertical(1)));
        frame.render_widget(header, area);
    }
}
