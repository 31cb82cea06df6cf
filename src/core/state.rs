//! # Day View State
//!
//! Everything the day view knows, in one struct:
//!
//! ```text
//! DayView
//! ├── date: NaiveDate              // selected local calendar day
//! ├── content: String              // loaded note text, error text, or ""
//! ├── pending: Option<Pending>     // load or editor session in flight
//! └── exit_error: Option<String>   // fatal error that ended the loop
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use chrono::NaiveDate;

/// The single operation allowed to be outstanding at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Load(NaiveDate),
    Edit(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub date: NaiveDate,
    pub content: String,
    pub pending: Option<Pending>,
    /// Set when the loop ends because of an unrecoverable error.
    pub exit_error: Option<String>,
}

impl DayView {
    /// A view of `date` with nothing loaded yet.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            content: String::new(),
            pending: None,
            exit_error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.pending, Some(Pending::Edit(_)))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.pending, Some(Pending::Load(_)))
    }
}
