//! Key bindings for the day view.
//!
//! Each binding lists the key chords that trigger it plus the short label
//! and description shown in the help bar.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::event::TuiEvent;

/// A single key chord: modifiers plus key code.
pub type Chord = (KeyModifiers, KeyCode);

#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub chords: &'static [Chord],
    /// Key name shown in the help bar.
    pub label: &'static str,
    pub description: &'static str,
}

impl Binding {
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.chords
            .iter()
            .any(|&(modifiers, code)| key.code == code && key.modifiers == modifiers)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeyMap {
    pub prev: Binding,
    pub next: Binding,
    pub today: Binding,
    pub edit: Binding,
    pub reload: Binding,
    pub quit: Binding,
}

pub const DEFAULT_KEYMAP: KeyMap = KeyMap {
    prev: Binding {
        chords: &[
            (KeyModifiers::NONE, KeyCode::Left),
            (KeyModifiers::NONE, KeyCode::Char('h')),
        ],
        label: "h",
        description: "prev day",
    },
    next: Binding {
        chords: &[
            (KeyModifiers::NONE, KeyCode::Right),
            (KeyModifiers::NONE, KeyCode::Char('l')),
        ],
        label: "l",
        description: "next day",
    },
    today: Binding {
        chords: &[(KeyModifiers::NONE, KeyCode::Char('t'))],
        label: "t",
        description: "today",
    },
    edit: Binding {
        chords: &[(KeyModifiers::NONE, KeyCode::Char('e'))],
        label: "e",
        description: "edit",
    },
    reload: Binding {
        chords: &[(KeyModifiers::NONE, KeyCode::Char('r'))],
        label: "r",
        description: "reload",
    },
    quit: Binding {
        chords: &[
            (KeyModifiers::CONTROL, KeyCode::Char('c')),
            (KeyModifiers::NONE, KeyCode::Char('q')),
        ],
        label: "q",
        description: "quit",
    },
};

impl KeyMap {
    /// Bindings in help-bar order.
    pub fn short_help(&self) -> [&Binding; 6] {
        [
            &self.prev,
            &self.next,
            &self.today,
            &self.edit,
            &self.reload,
            &self.quit,
        ]
    }

    /// Day-navigation event for `key`, if it is bound.
    pub fn event_for(&self, key: &KeyEvent) -> Option<TuiEvent> {
        let pairs = [
            (&self.quit, TuiEvent::Quit),
            (&self.prev, TuiEvent::PrevDay),
            (&self.next, TuiEvent::NextDay),
            (&self.today, TuiEvent::Today),
            (&self.edit, TuiEvent::Edit),
            (&self.reload, TuiEvent::Reload),
        ];
        pairs
            .into_iter()
            .find(|(binding, _)| binding.matches(key))
            .map(|(_, event)| event)
    }
}
