//! # Actions
//!
//! Everything that can happen in the day view becomes an `Action`.
//! User presses `l`? That's `Action::NextDay`.
//! The note finished loading? That's `Action::ContentLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the `Effect` the caller should carry out. No I/O
//! happens here; loading files and launching the editor live in
//! `dispatch.rs`.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use chrono::{Days, NaiveDate};
use log::{debug, info, warn};

use crate::core::notes::LoadResult;
use crate::core::state::{DayView, Pending};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    PreviousDay,
    NextDay,
    /// Jump to the given day. Carries the date so `update` stays pure.
    GoToToday(NaiveDate),
    /// Load the current day again.
    Reload,
    Edit,
    ContentLoaded { date: NaiveDate, result: LoadResult },
    /// The editor exited; `Err` holds a description of the failure.
    EditorFinished(Result<(), String>),
}

/// Side effect requested by `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    LoadContent(NaiveDate),
    LaunchEditor(NaiveDate),
}

pub fn update(app: &mut DayView, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Quit => Effect::Quit,
        Action::PreviousDay => match app.date.checked_sub_days(Days::new(1)) {
            Some(date) => go_to(app, date),
            None => {
                warn!("Cannot move before {}", app.date);
                Effect::None
            }
        },
        Action::NextDay => match app.date.checked_add_days(Days::new(1)) {
            Some(date) => go_to(app, date),
            None => {
                warn!("Cannot move past {}", app.date);
                Effect::None
            }
        },
        Action::GoToToday(today) => go_to(app, today),
        Action::Reload => {
            app.pending = Some(Pending::Load(app.date));
            Effect::LoadContent(app.date)
        }
        Action::Edit => {
            if app.is_editing() {
                debug!("Edit ignored: editor already running");
                return Effect::None;
            }
            info!("Editing note for {}", app.date);
            app.pending = Some(Pending::Edit(app.date));
            Effect::LaunchEditor(app.date)
        }
        Action::ContentLoaded { date, result } => {
            if date != app.date {
                debug!("Discarding stale load for {} (showing {})", date, app.date);
                return Effect::None;
            }
            if app.pending == Some(Pending::Load(date)) {
                app.pending = None;
            }
            app.content = result.into_content();
            Effect::None
        }
        Action::EditorFinished(Ok(())) => {
            info!("Editor closed, reloading {}", app.date);
            app.pending = Some(Pending::Load(app.date));
            Effect::LoadContent(app.date)
        }
        Action::EditorFinished(Err(e)) => {
            warn!("Editor failed: {}", e);
            app.pending = None;
            app.exit_error = Some(e);
            Effect::Quit
        }
    }
}

fn go_to(app: &mut DayView, date: NaiveDate) -> Effect {
    app.date = date;
    app.pending = Some(Pending::Load(date));
    Effect::LoadContent(date)
}
