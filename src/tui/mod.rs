//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the day view,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing on screen animates, so the loop only draws after an event
//! (key, mouse wheel, resize) and otherwise sleeps in `poll`.
//!
//! ## Editor Hand-off
//!
//! While the external editor runs, the terminal belongs to it: the
//! alternate screen, raw mode and mouse capture are switched off, then
//! restored once the editor exits and the screen is repainted from scratch.

mod component;
pub mod components;
pub mod event;
pub mod keymap;
pub mod markdown;
pub mod theme;
mod ui;

use log::{debug, info};
use std::io::{self, stdout};
use std::path::Path;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::core::action::Action;
use crate::core::config::{ResolvedConfig, Theme};
use crate::core::dispatch::{Flow, dispatch};
use crate::core::editor::{EditorCommand, EditorError, EditorLauncher};
use crate::core::notes::{FsNoteStore, NoteSource};
use crate::core::state::DayView;
use crate::error::AppError;
use crate::tui::component::EventHandler;
use crate::tui::components::NoteBodyState;
use crate::tui::event::{TuiEvent, poll_event_timeout};
use crate::tui::theme::Palette;

/// How long the loop sleeps waiting for input before checking again.
const POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub body: NoteBodyState,
    pub palette: Palette,
    pub render_markdown: bool,
    /// Frames drawn so far.
    pub frames_drawn: usize,
}

impl TuiState {
    pub fn new(theme: Theme, render_markdown: bool) -> Self {
        Self {
            body: NoteBodyState::new(),
            palette: Palette::for_theme(theme),
            render_markdown,
            frames_drawn: 0,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Give the terminal back to the shell so a child process can use it.
fn suspend_terminal() -> io::Result<()> {
    execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, Show)?;
    disable_raw_mode()
}

fn resume_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)
}

/// Runs the configured editor with the terminal handed over to it.
struct SuspendingEditor {
    command: EditorCommand,
}

impl EditorLauncher for SuspendingEditor {
    fn launch(&mut self, path: &Path) -> Result<(), EditorError> {
        suspend_terminal().map_err(EditorError::Terminal)?;
        let outcome = self.command.run(path);
        resume_terminal().map_err(EditorError::Terminal)?;
        outcome
    }
}

pub fn run(config: &ResolvedConfig, start: NaiveDate) -> Result<(), AppError> {
    let store = FsNoteStore::new(&config.notes_dir);
    let command = EditorCommand::parse(&config.editor).map_err(|e| AppError::Editor(e.to_string()))?;
    let mut editor = SuspendingEditor { command };
    let mut app = DayView::new(start);
    let mut tui = TuiState::new(config.theme, config.render_markdown);

    info!(
        "Opening {} from {} (editor: {})",
        start,
        store.base_dir().display(),
        config.editor
    );

    let mut terminal = ratatui::try_init()?;
    let result = match TerminalModeGuard::new() {
        Ok(_guard) => event_loop(
            &mut terminal,
            &mut app,
            &mut tui,
            &store,
            &mut editor,
            || poll_event_timeout(POLL_TIMEOUT),
        ),
        Err(e) => Err(e.into()),
    };
    ratatui::restore();

    info!("Exiting on {} after {} frames", app.date, tui.frames_drawn);
    result
}

/// Drive the day view until the user quits or a fatal error occurs.
///
/// `next_event` returns `Ok(None)` when no input arrived in time. The
/// initial load happens before the first frame is drawn.
pub fn event_loop<B, S, E, F>(
    terminal: &mut Terminal<B>,
    app: &mut DayView,
    tui: &mut TuiState,
    source: &S,
    editor: &mut E,
    mut next_event: F,
) -> Result<(), AppError>
where
    B: Backend,
    S: NoteSource + ?Sized,
    E: EditorLauncher + ?Sized,
    F: FnMut() -> io::Result<Option<TuiEvent>>,
{
    if dispatch(app, Action::Reload, source, editor) == Flow::Quit {
        return exit_status(app);
    }

    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal
                .draw(|f| ui::draw_ui(f, app, tui))
                .map_err(backend_error)?;
            tui.frames_drawn += 1;
            needs_redraw = false;
        }

        let Some(event) = next_event()? else {
            continue;
        };
        needs_redraw = true;

        let action = match event {
            TuiEvent::Quit => Action::Quit,
            TuiEvent::PrevDay => Action::PreviousDay,
            TuiEvent::NextDay => Action::NextDay,
            TuiEvent::Today => Action::GoToToday(Local::now().date_naive()),
            TuiEvent::Edit => Action::Edit,
            TuiEvent::Reload => Action::Reload,
            TuiEvent::Resize(width, height) => {
                // Layout reads the frame size on the next draw
                debug!("Resized to {}x{}", width, height);
                continue;
            }
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown
            | TuiEvent::ScrollToTop => {
                tui.body.handle_event(&event);
                continue;
            }
        };

        let shown = app.date;
        match dispatch(app, action, source, editor) {
            Flow::Quit => break,
            Flow::Resumed => terminal.clear().map_err(backend_error)?,
            Flow::Continue => {}
        }
        if app.date != shown {
            tui.body.reset();
        }
    }

    exit_status(app)
}

fn exit_status(app: &DayView) -> Result<(), AppError> {
    match &app.exit_error {
        Some(e) => Err(AppError::Editor(e.clone())),
        None => Ok(()),
    }
}

fn backend_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Backend(e.to_string())
}
