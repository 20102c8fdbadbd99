//! Domain model for the note collection.
//!
//! # Responsibility
//! - Define the note record shared by the manager, views and storage.
//!
//! # Invariants
//! - Every in-memory note carries a `NoteId` that is unique for the session.
//! - Persisted records carry only title, contents and the two timestamps.

pub mod note;
mod timestamp;
