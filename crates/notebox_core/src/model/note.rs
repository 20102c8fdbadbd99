//! Note domain model.
//!
//! # Responsibility
//! - Define the user-authored note record and its two lifecycle mutations.
//!
//! # Invariants
//! - `created` is set once at construction and never changes.
//! - `modified` changes only through `Note::edit`.
//! - `id` is session-local: regenerated on load, never serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp;

/// Session-local identity used by list rows and selection.
pub type NoteId = Uuid;

/// A titled text note with creation/modification timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Row identity for this session; ignored by equality.
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: NoteId,
    /// User-entered title; may be empty.
    pub title: String,
    /// Absent in a stored record means an empty body.
    #[serde(default)]
    pub contents: String,
    /// Set once when the note is first saved.
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
    /// Last explicit edit; equals `created` until then.
    #[serde(with = "timestamp")]
    pub modified: DateTime<Utc>,
}

impl Note {
    /// Creates a note stamped with `now` for both timestamps.
    pub fn new(title: impl Into<String>, contents: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            contents: contents.into(),
            created: now,
            modified: now,
        }
    }

    /// Replaces title and contents and bumps `modified`.
    pub fn edit(&mut self, title: impl Into<String>, contents: impl Into<String>, now: DateTime<Utc>) {
        self.title = title.into();
        self.contents = contents.into();
        self.modified = now;
    }
}

/// Notes are equal when their persisted fields are; `id` is not compared.
impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.contents == other.contents
            && self.created == other.created
            && self.modified == other.modified
    }
}

impl Eq for Note {}
