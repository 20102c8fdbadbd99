//! Note snapshot repository over a key/value store.
//!
//! # Responsibility
//! - Read the serialized note collection at startup.
//! - Overwrite it with the full in-memory collection at teardown.
//!
//! # Invariants
//! - Loading never fails: absence, read errors and malformed data all mean
//!   "no notes".
//! - An absent key is initialized to the empty string on first load.
//! - Stored order equals collection order.

use crate::model::note::Note;
use crate::repo::kv_repo::{KeyValueRepository, RepoResult};
use log::{info, warn};

/// Storage key holding the serialized note array.
pub const NOTES_STORAGE_KEY: &str = "NotesApp.Notes";

/// Serializes notes as a JSON array of `{title, contents, created, modified}`.
pub fn encode_notes(notes: &[Note]) -> Result<String, serde_json::Error> {
    serde_json::to_string(notes)
}

/// Parses a stored JSON array back into notes with fresh session ids.
pub fn decode_notes(json: &str) -> Result<Vec<Note>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Owns the notes key of a key/value repository.
pub struct NoteSnapshotRepository<R: KeyValueRepository> {
    store: R,
}

impl<R: KeyValueRepository> NoteSnapshotRepository<R> {
    pub fn new(store: R) -> Self {
        Self { store }
    }

    /// Returns the persisted collection, or an empty one.
    pub fn load(&mut self) -> Vec<Note> {
        let stored = match self.store.get_value(NOTES_STORAGE_KEY) {
            Ok(stored) => stored,
            Err(err) => {
                warn!("event=notes_load module=repo status=error reason=read_failed error={err}");
                return Vec::new();
            }
        };

        let Some(json) = stored else {
            if let Err(err) = self.store.set_value(NOTES_STORAGE_KEY, "") {
                warn!("event=notes_load module=repo status=error reason=init_failed error={err}");
            }
            info!("event=notes_load module=repo status=ok source=initialized count=0");
            return Vec::new();
        };

        if json.is_empty() {
            info!("event=notes_load module=repo status=ok source=empty count=0");
            return Vec::new();
        }

        match decode_notes(&json) {
            Ok(notes) => {
                info!(
                    "event=notes_load module=repo status=ok source=stored count={}",
                    notes.len()
                );
                notes
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=repo status=error reason=malformed line={} column={}",
                    err.line(),
                    err.column()
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the stored value with the full collection.
    pub fn save(&mut self, notes: &[Note]) -> RepoResult<()> {
        let json = encode_notes(notes)?;
        self.store.set_value(NOTES_STORAGE_KEY, &json)?;
        info!(
            "event=notes_save module=repo status=ok count={} bytes={}",
            notes.len(),
            json.len()
        );
        Ok(())
    }

    /// Gives access to the underlying store.
    pub fn store(&self) -> &R {
        &self.store
    }
}
