//! Complaint Terminal User Interface (TUI)
//!
//! A single screen with the complaint form, the paginated complaint list and
//! a status bar. Requests run on spawned tasks and report back as
//! [`AppEvent`]s; all state changes happen on the UI loop.

pub mod app;
pub mod components;
pub mod events;
pub mod traits;
pub mod ui;

pub use app::{App, Focus};
pub use events::AppEvent;
