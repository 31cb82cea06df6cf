//! # TUI Components
//!
//! The day view is three stacked components:
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │        2024-01-15 · Monday       │  DateHeader  (stateless)
//! ├──────────────────────────────────┤
//! │ note text, markdown-rendered     │  NoteBody    (scroll state in TuiState)
//! │ ...                              │
//! ├──────────────────────────────────┤
//! │ h prev day • l next day • ...    │  HelpBar     (stateless)
//! └──────────────────────────────────┘
//! ```
//!
//! Components receive their data as props (struct fields) rather than
//! reaching into `DayView` or `TuiState`, which keeps each one testable
//! against a `TestBackend` on its own.

pub mod date_header;
pub mod help_bar;
pub mod note_body;

pub use date_header::DateHeader;
pub use help_bar::HelpBar;
pub use note_body::{NoteBody, NoteBodyState};
