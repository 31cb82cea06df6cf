use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseEventKind};

use crate::tui::keymap::{DEFAULT_KEYMAP, KeyMap};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    Quit,
    PrevDay,
    NextDay,
    Today,
    Edit,
    Reload,

    // TUI-local events (handled directly in TUI)
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,
    Resize(u16, u16),
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> std::io::Result<Option<TuiEvent>> {
    if event::poll(timeout)? {
        Ok(translate(event::read()?, &DEFAULT_KEYMAP))
    } else {
        Ok(None)
    }
}

/// Map a raw crossterm event onto a `TuiEvent`.
pub fn translate(event: Event, keymap: &KeyMap) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            // Release/repeat events show up on Windows and with enhanced keyboards
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            if let Some(mapped) = keymap.event_for(&key_event) {
                return Some(mapped);
            }
            match key_event.code {
                KeyCode::Up | KeyCode::Char('k') => Some(TuiEvent::ScrollUp),
                KeyCode::Down | KeyCode::Char('j') => Some(TuiEvent::ScrollDown),
                KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
                KeyCode::PageDown | KeyCode::Char(' ') => Some(TuiEvent::ScrollPageDown),
                KeyCode::Home | KeyCode::Char('g') => Some(TuiEvent::ScrollToTop),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(width, height) => Some(TuiEvent::Resize(width, height)),
        _ => None,
    }
}
