//! # Core Application Logic
//!
//! This module contains daybook's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • DayView (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • dispatch() (effects) │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ NoteSource │      │  Editor    │
//!     │  Adapter   │      │ (files on  │      │ Launcher   │
//!     │ (ratatui)  │      │   disk)    │      │ ($EDITOR)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `DayView` struct, all day-view state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`dispatch`]: Runs effects returned by `update()`
//! - [`notes`]: Date → file path, and the read-only loader
//! - [`editor`]: External editor command
//! - [`config`]: Layered settings

pub mod action;
pub mod config;
pub mod dispatch;
pub mod editor;
pub mod notes;
pub mod state;
