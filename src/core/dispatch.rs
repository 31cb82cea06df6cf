//! # Dispatch
//!
//! Runs an action through `update()` and carries out whatever effect comes
//! back, feeding the result in as the next action, until the state settles.
//!
//! ```text
//! Action ──► update() ──► Effect::LoadContent(d) ──► source.load(d)
//!              ▲                                         │
//!              └──────── Action::ContentLoaded ◄─────────┘
//! ```
//!
//! Loads are synchronous: only one is ever outstanding and the UI has
//! nothing else to do meanwhile, so there is no observable difference from
//! a background task.

use log::debug;

use crate::core::action::{Action, Effect, update};
use crate::core::editor::EditorLauncher;
use crate::core::notes::NoteSource;
use crate::core::state::DayView;

/// What the event loop should do after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// An editor session ran; the terminal needs a full repaint.
    Resumed,
    Quit,
}

pub fn dispatch<S, E>(app: &mut DayView, action: Action, source: &S, editor: &mut E) -> Flow
where
    S: NoteSource + ?Sized,
    E: EditorLauncher + ?Sized,
{
    let mut next = Some(action);
    let mut resumed = false;

    while let Some(action) = next.take() {
        match update(app, action) {
            Effect::None => {}
            Effect::Quit => return Flow::Quit,
            Effect::LoadContent(date) => {
                let result = source.load(date);
                next = Some(Action::ContentLoaded { date, result });
            }
            Effect::LaunchEditor(date) => {
                let path = source.path_for(date);
                let outcome = editor.launch(&path).map_err(|e| e.to_string());
                debug!("Editor outcome for {}: {:?}", path.display(), outcome);
                resumed = true;
                next = Some(Action::EditorFinished(outcome));
            }
        }
    }

    if resumed { Flow::Resumed } else { Flow::Continue }
}
