//! Core domain logic for Notebox.
//! Owns the note collection, the view state machine and the persisted mirror.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId};
pub use repo::kv_repo::{
    KeyValueRepository, MemoryKeyValueRepository, RepoError, RepoResult,
    SqliteKeyValueRepository,
};
pub use repo::note_repo::{decode_notes, encode_notes, NoteSnapshotRepository, NOTES_STORAGE_KEY};
pub use service::confirm::Confirm;
pub use service::note_manager::{Mode, NoteChange, NoteManager, Outcome};
pub use service::view::{human_date, ActionSet, DetailView, ListItem, View};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
