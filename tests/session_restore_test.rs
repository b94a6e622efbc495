//! Persist the primary tab's position and rebuild it on the next start

use notefinder::logic::navigation::next_selection;
use notefinder::logic::session::restore_columns;
use notefinder::model::{Activation, NavOutcome, Tab};
use notefinder::repo::Repository;
use notefinder::session::SessionDb;
use notefinder::store::{seed_demo_tree, NoteStore};

const APP_NAME: &str = "notefinder-test";

fn demo_store() -> NoteStore {
    let store = NoteStore::new_in_memory().expect("Failed to open store");
    seed_demo_tree(&store).expect("Failed to seed store");
    store
}

fn enter_focused(tab: &mut Tab, store: &NoteStore) {
    let Activation::Descend(ticket) = tab.activate() else {
        panic!("focused item is not a folder");
    };
    let folder_id = tab.focused_item().map(|i| i.id.clone()).expect("focused folder");
    assert_eq!(
        tab.complete_fetch(&ticket, store.get_children(Some(&folder_id))),
        NavOutcome::Applied
    );
}

/// Root -> Documents -> Work, focus on Project B
fn browsed_tab(store: &NoteStore) -> Tab {
    let mut tab = Tab::new(1, "Tab 1");
    let ticket = tab.begin_load_root().expect("root load should start");
    tab.complete_fetch(&ticket, store.get_children(None));
    enter_focused(&mut tab, store);
    tab.move_focus_with(next_selection);
    enter_focused(&mut tab, store);
    tab.move_focus_with(next_selection);
    tab
}

#[test]
fn test_restore_rebuilds_same_stack() {
    let store = demo_store();
    let session = SessionDb::new_in_memory().expect("Failed to open session db");

    let original = browsed_tab(&store);
    session
        .save_list_state(APP_NAME, &original.list_state())
        .expect("save");

    let state = session
        .load_list_state(APP_NAME)
        .expect("load")
        .expect("state was saved");
    assert_eq!(state.path, vec!["1".to_string(), "1-1".to_string()]);

    let restored = restore_columns(&store, &state).expect("restore");
    let mut tab = Tab::new(1, "Tab 1");
    tab.install_stack(restored.columns, restored.focus);

    assert_eq!(tab.visible_columns(), original.visible_columns());
    assert_eq!(tab.depth(), Some(2));
    assert_eq!(tab.focused_item().map(|i| i.title.as_str()), Some("Project B"));
}

#[test]
fn test_restore_stops_at_deleted_folder() {
    let store = demo_store();
    let session = SessionDb::new_in_memory().expect("Failed to open session db");

    let original = browsed_tab(&store);
    session
        .save_list_state(APP_NAME, &original.list_state())
        .expect("save");

    store.delete_folder("1-1").expect("delete Work");

    let state = session
        .load_list_state(APP_NAME)
        .expect("load")
        .expect("state was saved");
    let restored = restore_columns(&store, &state).expect("restore");

    let folders: Vec<_> = restored.columns.iter().map(|c| c.folder_id.clone()).collect();
    assert_eq!(folders, vec![None, Some("1".to_string())]);
}

#[test]
fn test_nothing_saved_yet() {
    let session = SessionDb::new_in_memory().expect("Failed to open session db");
    assert!(session.load_list_state(APP_NAME).expect("load").is_none());
}
