//! Note Manager state machine.
//!
//! # Responsibility
//! - Drive the Idle / Creating / Inspecting / Editing transitions.
//! - Apply commits to the in-memory collection and queue list-sync changes.
//! - Load from and persist to the note snapshot repository.
//!
//! # Invariants
//! - Exactly one mode is active; every commit or cancel returns to Idle.
//! - Selection, when present, references a note in the collection.
//! - Selection changes only in Idle.
//! - Collection order is insertion order; removal shifts later notes down.
//! - Guarded actions never error: they report `Outcome::Ignored`.

use crate::clock::Clock;
use crate::model::note::{Note, NoteId};
use crate::repo::kv_repo::{KeyValueRepository, RepoResult};
use crate::repo::note_repo::NoteSnapshotRepository;
use crate::service::confirm::Confirm;
use log::{debug, error, info};

const DISCARD_PROMPT: &str = "Discard Changes?";

/// Which view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// List view; resting state.
    #[default]
    Idle,
    /// Editable empty fields for a new note.
    Creating,
    /// Read-only fields of the selected note, with dates.
    Inspecting,
    /// Editable fields of the selected note.
    Editing,
}

impl Mode {
    /// Lowercase name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Creating => "creating",
            Self::Inspecting => "inspecting",
            Self::Editing => "editing",
        }
    }
}

/// Result of a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed as requested.
    Applied,
    /// Preconditions not met; nothing changed.
    Ignored,
    /// Confirmation refused; nothing changed.
    Declined,
}

impl Outcome {
    /// True for `Outcome::Applied`.
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// List-sync notification emitted after a collection mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteChange {
    /// A note was appended (or loaded) at `index`.
    Added { index: usize, id: NoteId },
    /// The note at `index` got a new title/contents.
    Edited { index: usize, id: NoteId },
    /// The note formerly at `index` is gone; later rows shifted down.
    Removed { index: usize, id: NoteId },
}

/// Single owner of the notes, the mode, the selection and the input fields.
pub struct NoteManager<R: KeyValueRepository, C: Clock> {
    notes: Vec<Note>,
    mode: Mode,
    selected: Option<NoteId>,
    title_input: String,
    contents_input: String,
    changes: Vec<NoteChange>,
    snapshots: NoteSnapshotRepository<R>,
    clock: C,
}

impl<R: KeyValueRepository, C: Clock> NoteManager<R, C> {
    /// Builds a manager in Idle from whatever `store` has persisted.
    ///
    /// Queues one `Added` change per loaded note, in stored order.
    pub fn load(store: R, clock: C) -> Self {
        let mut snapshots = NoteSnapshotRepository::new(store);
        let notes = snapshots.load();
        let changes = notes
            .iter()
            .enumerate()
            .map(|(index, note)| NoteChange::Added { index, id: note.id })
            .collect();

        Self {
            notes,
            mode: Mode::Idle,
            selected: None,
            title_input: String::new(),
            contents_input: String::new(),
            changes,
            snapshots,
            clock,
        }
    }

    /// Writes the full collection over the stored snapshot.
    pub fn persist(&mut self) -> RepoResult<()> {
        self.snapshots.save(&self.notes).inspect_err(|err| {
            error!("event=notes_persist module=service status=error error={err}");
        })
    }

    /// Collection in list order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Active view.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Highlighted note, if any.
    pub fn selected_id(&self) -> Option<NoteId> {
        self.selected
    }

    /// List position of the highlighted note.
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected?;
        self.notes.iter().position(|note| note.id == id)
    }

    /// The highlighted note itself.
    pub fn selected_note(&self) -> Option<&Note> {
        self.selected_index().map(|index| &self.notes[index])
    }

    /// Current title input field.
    pub fn title_input(&self) -> &str {
        &self.title_input
    }

    /// Current contents input field.
    pub fn contents_input(&self) -> &str {
        &self.contents_input
    }

    /// Storage handle, mostly useful to inspect what `persist` wrote.
    pub fn store(&self) -> &R {
        self.snapshots.store()
    }

    /// Drains queued list-sync changes in emission order.
    pub fn take_changes(&mut self) -> Vec<NoteChange> {
        std::mem::take(&mut self.changes)
    }

    /// Highlights the note with `id`. Only valid in Idle.
    pub fn select(&mut self, id: NoteId) -> Outcome {
        if self.mode != Mode::Idle || !self.notes.iter().any(|note| note.id == id) {
            return self.ignored("select");
        }
        self.selected = Some(id);
        Outcome::Applied
    }

    /// Highlights the note at list position `index`.
    pub fn select_index(&mut self, index: usize) -> Outcome {
        match self.notes.get(index) {
            Some(note) => {
                let id = note.id;
                self.select(id)
            }
            None => self.ignored("select"),
        }
    }

    /// Click outside any list item.
    pub fn clear_selection(&mut self) -> Outcome {
        if self.mode != Mode::Idle {
            return self.ignored("clear_selection");
        }
        self.selected = None;
        Outcome::Applied
    }

    /// Idle -> Creating with empty input fields.
    pub fn new_note(&mut self) -> Outcome {
        if self.mode != Mode::Idle {
            return self.ignored("new_note");
        }
        self.title_input.clear();
        self.contents_input.clear();
        self.enter(Mode::Creating);
        Outcome::Applied
    }

    /// Idle -> Inspecting on the selected note.
    pub fn inspect(&mut self) -> Outcome {
        self.open_selected(Mode::Inspecting, "inspect")
    }

    /// Idle -> Editing on the selected note.
    pub fn edit(&mut self) -> Outcome {
        self.open_selected(Mode::Editing, "edit")
    }

    /// Updates the title field; read-only outside Creating/Editing.
    pub fn set_title(&mut self, title: impl Into<String>) -> Outcome {
        if !self.inputs_editable() {
            return self.ignored("set_title");
        }
        self.title_input = title.into();
        Outcome::Applied
    }

    /// Updates the contents field; read-only outside Creating/Editing.
    pub fn set_contents(&mut self, contents: impl Into<String>) -> Outcome {
        if !self.inputs_editable() {
            return self.ignored("set_contents");
        }
        self.contents_input = contents.into();
        Outcome::Applied
    }

    /// Commits the open view and returns to Idle.
    ///
    /// Creating appends a new note; Editing rewrites the selected note;
    /// Inspecting just closes.
    pub fn save(&mut self) -> Outcome {
        match self.mode {
            Mode::Idle => return self.ignored("save"),
            Mode::Creating => {
                let note = Note::new(
                    std::mem::take(&mut self.title_input),
                    std::mem::take(&mut self.contents_input),
                    self.clock.now(),
                );
                let index = self.notes.len();
                self.changes.push(NoteChange::Added { index, id: note.id });
                self.notes.push(note);
                info!("event=note_create module=service status=ok index={index}");
            }
            Mode::Inspecting => {}
            Mode::Editing => {
                let Some(index) = self.selected_index() else {
                    self.close();
                    return self.ignored("save");
                };
                let now = self.clock.now();
                let title = std::mem::take(&mut self.title_input);
                let contents = std::mem::take(&mut self.contents_input);
                let note = &mut self.notes[index];
                note.edit(title, contents, now);
                self.changes.push(NoteChange::Edited { index, id: note.id });
                info!("event=note_edit module=service status=ok index={index}");
            }
        }
        self.close();
        Outcome::Applied
    }

    /// Leaves the open view without committing.
    ///
    /// Creating and Editing ask `confirm` first; declining keeps the view open
    /// with its input fields intact.
    pub fn cancel(&mut self, mut confirm: impl Confirm) -> Outcome {
        match self.mode {
            Mode::Idle => return self.ignored("cancel"),
            Mode::Inspecting => {}
            Mode::Creating | Mode::Editing => {
                if !confirm.confirm(DISCARD_PROMPT) {
                    return self.declined("cancel");
                }
            }
        }
        self.close();
        Outcome::Applied
    }

    /// Removes the selected note after confirmation.
    ///
    /// Valid in Idle and Inspecting; never mid-create or mid-edit. Deleting
    /// from Inspecting closes the view.
    pub fn delete(&mut self, mut confirm: impl Confirm) -> Outcome {
        if !matches!(self.mode, Mode::Idle | Mode::Inspecting) {
            return self.ignored("delete");
        }
        let Some(index) = self.selected_index() else {
            return self.ignored("delete");
        };

        let prompt = format!("Delete \"{}\"?", self.notes[index].title);
        if !confirm.confirm(&prompt) {
            return self.declined("delete");
        }

        let removed = self.notes.remove(index);
        self.selected = None;
        self.changes.push(NoteChange::Removed {
            index,
            id: removed.id,
        });
        info!("event=note_delete module=service status=ok index={index}");

        if self.mode == Mode::Inspecting {
            self.close();
        }
        Outcome::Applied
    }

    fn open_selected(&mut self, mode: Mode, action: &str) -> Outcome {
        if self.mode != Mode::Idle {
            return self.ignored(action);
        }
        let Some(note) = self.selected_note() else {
            return self.ignored(action);
        };
        let (title, contents) = (note.title.clone(), note.contents.clone());
        self.title_input = title;
        self.contents_input = contents;
        self.enter(mode);
        Outcome::Applied
    }

    fn inputs_editable(&self) -> bool {
        matches!(self.mode, Mode::Creating | Mode::Editing)
    }

    fn enter(&mut self, mode: Mode) {
        debug!(
            "event=mode_change module=service status=ok from={} to={}",
            self.mode.as_str(),
            mode.as_str()
        );
        self.mode = mode;
    }

    fn close(&mut self) {
        self.title_input.clear();
        self.contents_input.clear();
        self.enter(Mode::Idle);
    }

    fn ignored(&self, action: &str) -> Outcome {
        debug!(
            "event=action module=service status=ignored action={action} mode={}",
            self.mode.as_str()
        );
        Outcome::Ignored
    }

    fn declined(&self, action: &str) -> Outcome {
        debug!(
            "event=action module=service status=declined action={action} mode={}",
            self.mode.as_str()
        );
        Outcome::Declined
    }
}
