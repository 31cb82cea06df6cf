//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::NaiveDate;

use crate::core::editor::{EditorError, EditorLauncher};
use crate::core::notes::{LoadResult, NoteSource, note_file_name};

/// Shorthand for a valid calendar date.
pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[derive(Default)]
struct FakeNotesInner {
    results: HashMap<NaiveDate, LoadResult>,
    loads: Vec<NaiveDate>,
}

/// In-memory note source. Days without an entry load as `NotFound`.
///
/// Clones share storage, so a `ScriptedEditor` can "write" a note that a
/// later load observes.
#[derive(Clone, Default)]
pub struct FakeNotes {
    inner: Rc<RefCell<FakeNotesInner>>,
}

impl FakeNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_note(self, date: NaiveDate, text: &str) -> Self {
        self.set(date, LoadResult::Loaded(text.to_string()));
        self
    }

    pub fn with_result(self, date: NaiveDate, result: LoadResult) -> Self {
        self.set(date, result);
        self
    }

    pub fn set(&self, date: NaiveDate, result: LoadResult) {
        self.inner.borrow_mut().results.insert(date, result);
    }

    /// Every date passed to `load`, in order.
    pub fn loads(&self) -> Vec<NaiveDate> {
        self.inner.borrow().loads.clone()
    }
}

impl NoteSource for FakeNotes {
    fn path_for(&self, date: NaiveDate) -> PathBuf {
        PathBuf::from("/fake-notes").join(note_file_name(date))
    }

    fn load(&self, date: NaiveDate) -> LoadResult {
        let mut inner = self.inner.borrow_mut();
        inner.loads.push(date);
        inner
            .results
            .get(&date)
            .cloned()
            .unwrap_or(LoadResult::NotFound)
    }
}

/// Editor that records launches instead of spawning a process.
pub struct ScriptedEditor {
    fail: bool,
    launched: Vec<PathBuf>,
    write: Option<(FakeNotes, NaiveDate, String)>,
}

impl ScriptedEditor {
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            launched: Vec::new(),
            write: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::succeeding()
        }
    }

    /// On the next successful launch, store `text` as the note for `date`.
    pub fn on_success_write(&mut self, notes: &FakeNotes, date: NaiveDate, text: &str) {
        self.write = Some((notes.clone(), date, text.to_string()));
    }

    pub fn launched(&self) -> Vec<PathBuf> {
        self.launched.clone()
    }
}

impl EditorLauncher for ScriptedEditor {
    fn launch(&mut self, path: &Path) -> Result<(), EditorError> {
        self.launched.push(path.to_path_buf());
        if self.fail {
            return Err(EditorError::Spawn {
                program: "fake-editor".to_string(),
                source: io::Error::other("scripted failure"),
            });
        }
        if let Some((notes, date, text)) = self.write.take() {
            notes.set(date, LoadResult::Loaded(text));
        }
        Ok(())
    }
}
