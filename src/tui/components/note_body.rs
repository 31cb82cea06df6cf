//! # NoteBody Component
//!
//! Scrollable view of the day's note.
//!
//! `NoteBody` is a transient component (created each frame) that wraps
//! `&'a mut NoteBodyState` (persistent scroll state) and the note text
//! (props). The render pass records the wrapped content height so scroll
//! events between frames can be clamped to the content.
//!
//! If markdown rendering fails the raw text is shown instead; a broken
//! note never takes the viewer down.

use log::warn;
use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::Style;
use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;
use crate::tui::theme::Palette;

/// Scroll state for the note body. Persisted in `TuiState`.
#[derive(Default)]
pub struct NoteBodyState {
    pub scroll_state: ScrollViewState,
    /// Wrapped height of the last rendered content.
    pub content_height: u16,
    /// Height of the last render area.
    pub viewport_height: u16,
}

impl NoteBodyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top, e.g. after switching days.
    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
    }

    pub fn offset(&self) -> u16 {
        self.scroll_state.offset().y
    }

    /// Keep the offset within the content so the last line stays on screen.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for NoteBodyState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::ScrollToTop => self.scroll_state.scroll_to_top(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

pub struct NoteBody<'a> {
    pub state: &'a mut NoteBodyState,
    pub content: &'a str,
    pub render_markdown: bool,
    pub palette: &'a Palette,
}

impl<'a> NoteBody<'a> {
    pub fn new(
        state: &'a mut NoteBodyState,
        content: &'a str,
        render_markdown: bool,
        palette: &'a Palette,
    ) -> Self {
        Self {
            state,
            content,
            render_markdown,
            palette,
        }
    }

    fn styled_text(&self) -> Text<'static> {
        let raw = || Text::styled(self.content.to_string(), Style::default().fg(self.palette.body));
        if !self.render_markdown {
            return raw();
        }
        match markdown::render(self.content, self.palette) {
            Ok(text) => text,
            Err(e) => {
                warn!("Markdown rendering failed, showing raw note: {}", e);
                raw()
            }
        }
    }
}

impl<'a> Component for NoteBody<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width < 2 || area.height == 0 {
            return;
        }
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let paragraph = Paragraph::new(self.styled_text()).wrap(Wrap { trim: false });
        let height = paragraph
            .line_count(content_width)
            .clamp(1, u16::MAX as usize) as u16;

        self.state.content_height = height;
        self.state.viewport_height = area.height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
