//! Note Manager: the view state machine and its collaborators.
//!
//! # Responsibility
//! - Keep the note collection, the active mode and the selection consistent.
//! - Render a host-agnostic view model for front-ends.

pub mod confirm;
pub mod note_manager;
pub mod view;
