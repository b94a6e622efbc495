//! Cut in one tab, paste in another
//!
//! After a move, every affected folder is re-fetched once and pushed into
//! every tab that shows it, including columns retained beyond the active
//! depth.

use std::sync::Arc;
use std::time::Duration;

use notefinder::logic::navigation::next_selection;
use notefinder::logic::paste::{plan_paste, MoveCall};
use notefinder::model::{Activation, Clipboard, Model, NavOutcome, TabManager, TrackAnimator};
use notefinder::repo::{ItemKind, Repository};
use notefinder::services::{spawn_repo_service, ReloadScope, RepoRequest, RepoResponse};
use notefinder::store::NoteStore;

fn two_folder_store() -> NoteStore {
    let store = NoteStore::new_in_memory().expect("Failed to open store");
    store.insert_with_id("src", ItemKind::Folder, "Inbox", None).expect("insert src");
    store.insert_with_id("dst", ItemKind::Folder, "Archive", None).expect("insert dst");
    store.insert_with_id("n1", ItemKind::Note, "Receipt", Some("src")).expect("insert n1");
    store.insert_with_id("n2", ItemKind::Note, "Ticket", Some("src")).expect("insert n2");
    store
}

/// Load the root of the active tab and enter the folder titled `title`
fn open_folder(tabs: &mut TabManager, store: &NoteStore, title: &str) {
    let tab = tabs.active_mut();
    let ticket = tab.begin_load_root().expect("root load should start");
    assert_eq!(tab.complete_fetch(&ticket, store.get_children(None)), NavOutcome::Applied);

    let index = tab
        .active_column()
        .and_then(|c| c.items.iter().position(|i| i.title == title))
        .expect("folder listed at root");
    tab.set_focused_index(index);

    let Activation::Descend(ticket) = tab.activate() else {
        panic!("expected to enter {}", title);
    };
    let folder_id = tab.focused_item().map(|i| i.id.clone()).expect("focused folder");
    assert_eq!(
        tab.complete_fetch(&ticket, store.get_children(Some(&folder_id))),
        NavOutcome::Applied
    );
}

fn apply_move(store: &NoteStore, call: &MoveCall, target: Option<&str>) -> bool {
    match call {
        MoveCall::None => false,
        MoveCall::Single { id, kind } => store.move_item(id, *kind, target).expect("move_item"),
        MoveCall::Batch(items) => !store.move_items(items, target).expect("move_items").moved.is_empty(),
    }
}

#[tokio::test]
async fn test_paste_refreshes_both_tabs() {
    let store = Arc::new(two_folder_store());
    let (tx, mut rx) = spawn_repo_service(store.clone(), Duration::from_secs(5));
    let mut model = Model::new(TrackAnimator::new(24, 5, Duration::ZERO, true));

    // Tab 1 browses the source folder and cuts both notes
    open_folder(&mut model.tabs, &store, "Inbox");
    let source_tab = model.tabs.active().id();
    model.toggle_mark_mode();
    model.move_focus_with(next_selection);
    assert_eq!(model.cut(), 2);

    // Tab 2 browses the destination and pastes
    model.tabs.open_tab();
    open_folder(&mut model.tabs, &store, "Archive");
    let plan = model.begin_paste().expect("staged items to move");
    assert!(matches!(plan.call, MoveCall::Batch(ref items) if items.len() == 2));
    tx.send(RepoRequest::Move { plan }).expect("send move");

    let RepoResponse::Moved { plan, result } = rx.recv().await.expect("move response") else {
        panic!("expected the move to answer first");
    };
    let reloads = model.apply_moved(plan, result);
    assert_eq!(reloads.len(), 2);

    let pending = reloads.len();
    for request in reloads {
        tx.send(request).expect("send reload");
    }
    for _ in 0..pending {
        match rx.recv().await.expect("reload response") {
            RepoResponse::FolderReloaded {
                folder_id,
                scope,
                focus_id,
                items,
            } => {
                assert_eq!(scope, ReloadScope::AllTabs);
                let items = items.expect("listing");
                model.apply_reload(folder_id.as_deref(), &scope, focus_id.as_deref(), &items);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    let source = model.tabs.get(source_tab).expect("source tab still open");
    assert!(source.active_column().is_some_and(|c| c.items.is_empty()));
    let titles: Vec<_> = model
        .tabs
        .active()
        .active_column()
        .map(|c| c.items.iter().map(|i| i.title.clone()).collect())
        .unwrap_or_default();
    assert_eq!(titles, vec!["Receipt".to_string(), "Ticket".to_string()]);
    assert!(!model.clipboard.has_cut());
    assert!(model.ui.toast_message.is_none());
}

#[test]
fn test_paste_into_source_folder_moves_nothing() {
    let store = two_folder_store();
    let mut tabs = TabManager::new();
    let mut clipboard = Clipboard::new();

    open_folder(&mut tabs, &store, "Inbox");
    let focused = tabs.active().focused_item().cloned();
    assert_eq!(clipboard.cut_marked_or_focused(focused.as_ref(), Some("src")), 1);

    let buffer = clipboard.take_cut().expect("staged cut");
    let plan = plan_paste(&buffer, Some("src"));

    assert_eq!(plan.call, MoveCall::None);
    assert!(!apply_move(&store, &plan.call, plan.target.as_deref()));
    assert_eq!(store.get_children(Some("src")).expect("listing").len(), 2);
}

#[test]
fn test_reload_reaches_retained_columns() {
    let store = two_folder_store();
    let mut tabs = TabManager::new();
    open_folder(&mut tabs, &store, "Inbox");

    // Leave the folder: its column is retained beyond the active depth
    assert!(tabs.active_mut().go_shallower());
    store.create_note("Bill", Some("src")).expect("create");

    let items = store.get_children(Some("src")).expect("reload");
    let changed = tabs.apply_listing_everywhere(Some("src"), &items);

    assert_eq!(changed, vec![tabs.active().id()]);
    assert_eq!(tabs.active().columns()[1].items.len(), 3);
}
