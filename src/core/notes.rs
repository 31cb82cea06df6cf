//! # Note Files
//!
//! Maps a calendar day to its markdown file and reads it.
//!
//! ```text
//! <base>/2024-01-15.md
//! <base>/2024-01-16.md
//! ```
//!
//! Loading is strictly read-only. A missing file is the normal state for a
//! day nobody has written about yet, so it comes back as `NotFound` rather
//! than an error, and nothing is created on disk while browsing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, warn};
use thiserror::Error;

/// Filename format for a day's note (ISO 8601 date).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Extension appended to every note file.
pub const NOTE_EXTENSION: &str = "md";

/// Outcome of loading one day's note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    Loaded(String),
    NotFound,
    /// Human-readable description of what went wrong.
    Failed(String),
}

impl LoadResult {
    /// Collapse into the text shown in the day view.
    ///
    /// `NotFound` and an empty file both become `""`.
    pub fn into_content(self) -> String {
        match self {
            LoadResult::Loaded(text) => text,
            LoadResult::NotFound => String::new(),
            LoadResult::Failed(description) => description,
        }
    }
}

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("could not resolve note path {}: {source}", path.display())]
    Resolve { path: PathBuf, source: io::Error },
    #[error("could not stat {}: {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },
    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error(
        "{} is not valid UTF-8 text (bad byte at offset {})",
        path.display(),
        source.utf8_error().valid_up_to()
    )]
    Encoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
}

/// Where notes come from. The filesystem in production, fakes in tests.
pub trait NoteSource {
    /// Absolute path of the note for `date`.
    fn path_for(&self, date: NaiveDate) -> PathBuf;

    fn load(&self, date: NaiveDate) -> LoadResult;
}

/// File name for a day: `YYYY-MM-DD.md`.
pub fn note_file_name(date: NaiveDate) -> String {
    format!("{}.{}", date.format(DATE_FORMAT), NOTE_EXTENSION)
}

/// Filesystem-backed notes rooted at a single base directory.
#[derive(Debug, Clone)]
pub struct FsNoteStore {
    base_dir: PathBuf,
}

impl FsNoteStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute path for `date`, failing only if the working directory
    /// is needed and cannot be determined.
    pub fn resolve_path(&self, date: NaiveDate) -> Result<PathBuf, NoteError> {
        let path = self.base_dir.join(note_file_name(date));
        std::path::absolute(&path).map_err(|source| NoteError::Resolve { path, source })
    }

    /// Read the note for `date`. `Ok(None)` means no file exists.
    pub fn read(&self, date: NaiveDate) -> Result<Option<String>, NoteError> {
        let path = self.resolve_path(date)?;

        match fs::metadata(&path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(NoteError::Stat { path, source }),
        }

        let bytes = fs::read(&path).map_err(|source| NoteError::Read {
            path: path.clone(),
            source,
        })?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|source| NoteError::Encoding { path, source })
    }
}

impl NoteSource for FsNoteStore {
    fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.resolve_path(date)
            .unwrap_or_else(|_| self.base_dir.join(note_file_name(date)))
    }

    fn load(&self, date: NaiveDate) -> LoadResult {
        match self.read(date) {
            Ok(Some(text)) => {
                debug!("Loaded note for {} ({} bytes)", date, text.len());
                LoadResult::Loaded(text)
            }
            Ok(None) => {
                debug!("No note for {}", date);
                LoadResult::NotFound
            }
            Err(e) => {
                warn!("Failed to load note for {}: {}", date, e);
                LoadResult::Failed(e.to_string())
            }
        }
    }
}
