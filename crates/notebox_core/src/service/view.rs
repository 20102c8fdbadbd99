//! Host-agnostic view model rendered from manager state.
//!
//! # Invariants
//! - Rendering is pure: it never mutates the manager.
//! - Inspect/Edit/Delete are enabled only while a note is selected.

use super::note_manager::{Mode, NoteManager};
use crate::clock::Clock;
use crate::model::note::NoteId;
use crate::repo::kv_repo::KeyValueRepository;
use chrono::{DateTime, Local, Utc};

const LIST_TITLE: &str = "Your Notes";
const CREATE_TITLE: &str = "New Note";

/// Enabled state of each user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionSet {
    /// Start a new note.
    pub new: bool,
    /// Open the selected note read-only.
    pub inspect: bool,
    /// Open the selected note for editing.
    pub edit: bool,
    /// Remove the selected note.
    pub delete: bool,
    /// Commit and close the open note.
    pub save: bool,
    /// Close the open note without committing.
    pub cancel: bool,
}

impl ActionSet {
    /// Enablement rules for `mode` with or without a selection.
    pub fn for_state(mode: Mode, has_selection: bool) -> Self {
        match mode {
            Mode::Idle => Self {
                new: true,
                inspect: has_selection,
                edit: has_selection,
                delete: has_selection,
                ..Self::default()
            },
            Mode::Creating | Mode::Editing => Self {
                save: true,
                cancel: true,
                ..Self::default()
            },
            Mode::Inspecting => Self {
                delete: has_selection,
                save: true,
                cancel: true,
                ..Self::default()
            },
        }
    }
}

/// One row of the note list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Identity to pass back to `NoteManager::select`.
    pub id: NoteId,
    /// Note title as stored.
    pub title: String,
    /// Creation date, see `human_date`.
    pub created_label: String,
    /// Whether this row is highlighted.
    pub selected: bool,
}

/// Detail panel shown while creating, inspecting or editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Title input field.
    pub title: String,
    /// Contents input field.
    pub contents: String,
    /// True while inspecting.
    pub read_only: bool,
    /// Present only while inspecting.
    pub created_label: Option<String>,
    /// Present only while inspecting.
    pub modified_label: Option<String>,
}

/// Full screen description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Mode the view was rendered in.
    pub mode: Mode,
    /// Top bar text.
    pub title_bar: String,
    /// The list is shown only in Idle.
    pub list_visible: bool,
    /// Every note in collection order, visible or not.
    pub items: Vec<ListItem>,
    /// Open note panel; `None` in Idle.
    pub detail: Option<DetailView>,
    /// Which actions the user may take now.
    pub actions: ActionSet,
}

/// Formats a timestamp as `Mon Jan 01 2024` in local time.
pub fn human_date(value: DateTime<Utc>) -> String {
    value.with_timezone(&Local).format("%a %b %d %Y").to_string()
}

impl<R: KeyValueRepository, C: Clock> NoteManager<R, C> {
    /// Renders the current state.
    pub fn view(&self) -> View {
        let mode = self.mode();
        let selected = self.selected_id();
        let selected_note = self.selected_note();

        let items = self
            .notes()
            .iter()
            .map(|note| ListItem {
                id: note.id,
                title: note.title.clone(),
                created_label: human_date(note.created),
                selected: Some(note.id) == selected,
            })
            .collect();

        let title_bar = match (mode, selected_note) {
            (Mode::Creating, _) => CREATE_TITLE.to_string(),
            (Mode::Inspecting, Some(note)) => note.title.clone(),
            (Mode::Editing, Some(note)) => format!("Edit - {}", note.title),
            _ => LIST_TITLE.to_string(),
        };

        let detail = (mode != Mode::Idle).then(|| {
            let inspecting = mode == Mode::Inspecting;
            let dates = selected_note.filter(|_| inspecting);
            DetailView {
                title: self.title_input().to_string(),
                contents: self.contents_input().to_string(),
                read_only: inspecting,
                created_label: dates.map(|note| human_date(note.created)),
                modified_label: dates.map(|note| human_date(note.modified)),
            }
        });

        View {
            mode,
            title_bar,
            list_visible: mode == Mode::Idle,
            items,
            detail,
            actions: ActionSet::for_state(mode, selected.is_some()),
        }
    }
}
