use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use notebox_core::{
    encode_notes, Clock, KeyValueRepository, MemoryKeyValueRepository, Mode, Note, NoteChange,
    NoteManager, Outcome, NOTES_STORAGE_KEY,
};
use std::cell::Cell;

/// Advances one second on every read.
struct StepClock {
    base: DateTime<Utc>,
    ticks: Cell<i64>,
}

impl StepClock {
    fn new() -> Self {
        Self {
            base: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            ticks: Cell::new(0),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.get();
        self.ticks.set(tick + 1);
        self.base + TimeDelta::seconds(tick)
    }
}

type TestManager = NoteManager<MemoryKeyValueRepository, StepClock>;

fn empty_manager() -> TestManager {
    NoteManager::load(MemoryKeyValueRepository::new(), StepClock::new())
}

fn manager_with(titles: &[&str]) -> TestManager {
    let base = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let notes: Vec<Note> = titles
        .iter()
        .map(|title| Note::new(*title, format!("{title} body"), base))
        .collect();
    let store = MemoryKeyValueRepository::with_entry(NOTES_STORAGE_KEY, encode_notes(&notes).unwrap());
    let mut manager = NoteManager::load(store, StepClock::new());
    manager.take_changes();
    manager
}

fn titles(manager: &TestManager) -> Vec<&str> {
    manager.notes().iter().map(|note| note.title.as_str()).collect()
}

#[test]
fn create_and_save_appends_one_note() {
    let mut manager = manager_with(&["existing"]);

    assert_eq!(manager.new_note(), Outcome::Applied);
    assert_eq!(manager.mode(), Mode::Creating);
    manager.set_title("T");
    manager.set_contents("C");
    assert_eq!(manager.save(), Outcome::Applied);

    assert_eq!(manager.mode(), Mode::Idle);
    assert_eq!(titles(&manager), vec!["existing", "T"]);
    let created = manager.notes()[1].clone();
    assert_eq!(created.contents, "C");
    assert_eq!(created.created, created.modified);
    assert_eq!(
        manager.take_changes(),
        vec![NoteChange::Added {
            index: 1,
            id: created.id
        }]
    );
    assert_eq!(manager.title_input(), "");
    assert_eq!(manager.contents_input(), "");
}

#[test]
fn editing_selected_note_updates_only_that_note() {
    let mut manager = manager_with(&["a", "b", "c"]);
    let untouched: Vec<Note> = vec![manager.notes()[0].clone(), manager.notes()[2].clone()];

    manager.select_index(1);
    assert_eq!(manager.edit(), Outcome::Applied);
    assert_eq!(manager.mode(), Mode::Editing);
    assert_eq!(manager.title_input(), "b");
    assert_eq!(manager.contents_input(), "b body");

    manager.set_title("b2");
    manager.set_contents("rewritten");
    assert_eq!(manager.save(), Outcome::Applied);

    let edited = manager.notes()[1].clone();
    assert_eq!(edited.title, "b2");
    assert_eq!(edited.contents, "rewritten");
    assert!(edited.modified > edited.created);
    assert_eq!(manager.notes()[0], untouched[0]);
    assert_eq!(manager.notes()[2], untouched[1]);
    assert_eq!(
        manager.take_changes(),
        vec![NoteChange::Edited {
            index: 1,
            id: edited.id
        }]
    );
    assert_eq!(manager.selected_index(), Some(1));
}

#[test]
fn confirmed_cancel_of_create_leaves_collection_unchanged() {
    let mut manager = manager_with(&["a"]);
    let before = manager.notes().to_vec();

    manager.new_note();
    manager.set_title("scratch");
    let mut prompts = Vec::new();
    let outcome = manager.cancel(|prompt: &str| {
        prompts.push(prompt.to_string());
        true
    });

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(prompts, vec!["Discard Changes?".to_string()]);
    assert_eq!(manager.mode(), Mode::Idle);
    assert_eq!(manager.notes(), before.as_slice());
    assert!(manager.take_changes().is_empty());
}

#[test]
fn confirmed_cancel_of_edit_leaves_collection_unchanged() {
    let mut manager = manager_with(&["a", "b"]);
    let before = manager.notes().to_vec();

    manager.select_index(0);
    manager.edit();
    manager.set_title("changed");
    assert_eq!(manager.cancel(|_: &str| true), Outcome::Applied);

    assert_eq!(manager.notes(), before.as_slice());
    assert_eq!(manager.mode(), Mode::Idle);
}

#[test]
fn declined_cancel_keeps_view_and_inputs() {
    let mut manager = empty_manager();
    manager.new_note();
    manager.set_title("keep me");

    assert_eq!(manager.cancel(|_: &str| false), Outcome::Declined);
    assert_eq!(manager.mode(), Mode::Creating);
    assert_eq!(manager.title_input(), "keep me");
}

#[test]
fn inspecting_closes_without_confirmation_or_mutation() {
    let mut manager = manager_with(&["a"]);
    let before = manager.notes().to_vec();

    manager.select_index(0);
    assert_eq!(manager.inspect(), Outcome::Applied);
    assert_eq!(manager.set_title("nope"), Outcome::Ignored);
    assert_eq!(
        manager.cancel(|_: &str| -> bool { panic!("inspect cancel must not prompt") }),
        Outcome::Applied
    );

    manager.inspect();
    assert_eq!(manager.save(), Outcome::Applied);
    assert_eq!(manager.mode(), Mode::Idle);
    assert_eq!(manager.notes(), before.as_slice());
}

#[test]
fn confirmed_delete_removes_exactly_selected_note() {
    let mut manager = manager_with(&["a", "b", "c", "d"]);
    let removed_id = manager.notes()[1].id;

    manager.select_index(1);
    let mut prompts = Vec::new();
    let outcome = manager.delete(|prompt: &str| {
        prompts.push(prompt.to_string());
        true
    });

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(prompts, vec!["Delete \"b\"?".to_string()]);
    assert_eq!(titles(&manager), vec!["a", "c", "d"]);
    assert_eq!(manager.selected_id(), None);
    assert_eq!(
        manager.take_changes(),
        vec![NoteChange::Removed {
            index: 1,
            id: removed_id
        }]
    );
}

#[test]
fn declined_delete_changes_nothing() {
    let mut manager = manager_with(&["a", "b"]);
    manager.select_index(0);

    assert_eq!(manager.delete(|_: &str| false), Outcome::Declined);
    assert_eq!(titles(&manager), vec!["a", "b"]);
    assert_eq!(manager.selected_index(), Some(0));
}

#[test]
fn delete_from_inspecting_closes_view() {
    let mut manager = manager_with(&["a", "b"]);
    manager.select_index(1);
    manager.inspect();

    assert_eq!(manager.delete(|_: &str| true), Outcome::Applied);
    assert_eq!(manager.mode(), Mode::Idle);
    assert_eq!(titles(&manager), vec!["a"]);
}

#[test]
fn delete_is_ignored_mid_create_and_mid_edit() {
    let mut manager = manager_with(&["a"]);
    manager.select_index(0);

    manager.edit();
    assert_eq!(manager.delete(|_: &str| true), Outcome::Ignored);
    manager.cancel(|_: &str| true);

    manager.new_note();
    assert_eq!(manager.delete(|_: &str| true), Outcome::Ignored);
    assert_eq!(titles(&manager), vec!["a"]);
}

#[test]
fn selection_required_actions_are_noops_without_selection() {
    let mut manager = manager_with(&["a"]);

    assert_eq!(manager.inspect(), Outcome::Ignored);
    assert_eq!(manager.edit(), Outcome::Ignored);
    assert_eq!(manager.delete(|_: &str| true), Outcome::Ignored);
    assert_eq!(manager.mode(), Mode::Idle);
    assert_eq!(titles(&manager), vec!["a"]);
}

#[test]
fn action_enablement_follows_selection() {
    let mut manager = manager_with(&["a", "b"]);

    let actions = manager.view().actions;
    assert!(actions.new);
    assert!(!actions.inspect && !actions.edit && !actions.delete);

    manager.select_index(0);
    let actions = manager.view().actions;
    assert!(actions.inspect && actions.edit && actions.delete);

    assert_eq!(manager.clear_selection(), Outcome::Applied);
    let actions = manager.view().actions;
    assert!(actions.new);
    assert!(!actions.inspect && !actions.edit && !actions.delete);
}

#[test]
fn selection_only_changes_in_idle() {
    let mut manager = manager_with(&["a", "b"]);
    manager.select_index(0);
    manager.inspect();

    assert_eq!(manager.select_index(1), Outcome::Ignored);
    assert_eq!(manager.clear_selection(), Outcome::Ignored);
    assert_eq!(manager.selected_index(), Some(0));
    assert_eq!(manager.select_index(7), Outcome::Ignored);
}

#[test]
fn transitions_only_start_from_idle() {
    let mut manager = manager_with(&["a"]);
    manager.select_index(0);
    manager.new_note();

    assert_eq!(manager.new_note(), Outcome::Ignored);
    assert_eq!(manager.inspect(), Outcome::Ignored);
    assert_eq!(manager.edit(), Outcome::Ignored);
    assert_eq!(manager.mode(), Mode::Creating);
    assert_eq!(manager.save(), Outcome::Applied);
    assert_eq!(manager.save(), Outcome::Ignored);
    assert_eq!(manager.cancel(|_: &str| true), Outcome::Ignored);
}

#[test]
fn view_reflects_each_mode() {
    let mut manager = manager_with(&["a"]);

    let idle = manager.view();
    assert_eq!(idle.title_bar, "Your Notes");
    assert!(idle.list_visible);
    assert!(idle.detail.is_none());
    assert_eq!(idle.items.len(), 1);

    manager.new_note();
    let creating = manager.view();
    assert_eq!(creating.title_bar, "New Note");
    assert!(!creating.list_visible);
    let detail = creating.detail.unwrap();
    assert!(!detail.read_only);
    assert!(detail.created_label.is_none());
    manager.cancel(|_: &str| true);

    manager.select_index(0);
    manager.inspect();
    let inspecting = manager.view();
    assert_eq!(inspecting.title_bar, "a");
    let detail = inspecting.detail.unwrap();
    assert!(detail.read_only);
    assert_eq!(detail.contents, "a body");
    assert!(detail.created_label.is_some() && detail.modified_label.is_some());
    manager.save();

    manager.edit();
    let editing = manager.view();
    assert_eq!(editing.title_bar, "Edit - a");
    let detail = editing.detail.unwrap();
    assert!(!detail.read_only);
    assert!(detail.modified_label.is_none());
    assert!(editing.items[0].selected);
}

#[test]
fn load_emits_added_changes_in_stored_order() {
    let base = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let notes = vec![Note::new("x", "", base), Note::new("y", "", base)];
    let store = MemoryKeyValueRepository::with_entry(NOTES_STORAGE_KEY, encode_notes(&notes).unwrap());
    let mut manager = NoteManager::load(store, StepClock::new());

    let ids: Vec<_> = manager.notes().iter().map(|note| note.id).collect();
    assert_eq!(
        manager.take_changes(),
        vec![
            NoteChange::Added { index: 0, id: ids[0] },
            NoteChange::Added { index: 1, id: ids[1] },
        ]
    );
    assert!(manager.take_changes().is_empty());
}

#[test]
fn persist_writes_full_snapshot_in_list_order() {
    let mut manager = manager_with(&["a", "b"]);
    manager.new_note();
    manager.set_title("c");
    manager.save();
    manager.select_index(0);
    manager.delete(|_: &str| true);

    manager.persist().unwrap();

    let stored = manager.store().get_value(NOTES_STORAGE_KEY).unwrap().unwrap();
    let reloaded = NoteManager::load(
        MemoryKeyValueRepository::with_entry(NOTES_STORAGE_KEY, stored),
        StepClock::new(),
    );
    assert_eq!(titles(&reloaded), vec!["b", "c"]);
    assert_eq!(reloaded.notes(), manager.notes());
}
