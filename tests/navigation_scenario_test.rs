//! End-to-end navigation against the demo store
//!
//! Drives a tab the way the binary does: take a ticket, fetch on the store,
//! resolve the ticket with the result. Covers focus memory across
//! leave/re-enter, retained columns, and re-entrancy.

use notefinder::logic::navigation::{next_selection, prev_selection};
use notefinder::model::{Activation, NavKind, NavOutcome, NavTicket, Tab};
use notefinder::repo::Repository;
use notefinder::store::{seed_demo_tree, NoteStore};

fn demo_store() -> NoteStore {
    let store = NoteStore::new_in_memory().expect("Failed to open store");
    seed_demo_tree(&store).expect("Failed to seed store");
    store
}

fn fetch(store: &NoteStore, ticket: &NavTicket) -> anyhow::Result<Vec<notefinder::repo::Item>> {
    match &ticket.kind {
        NavKind::Root => store.get_children(None),
        NavKind::Descend { folder, .. } => store.get_children(Some(&folder.id)),
        NavKind::Jump { .. } => panic!("jump tickets resolve through the jump planner"),
    }
}

fn load_root(tab: &mut Tab, store: &NoteStore) {
    let ticket = tab.begin_load_root().expect("root load should start");
    assert_eq!(tab.complete_fetch(&ticket, fetch(store, &ticket)), NavOutcome::Applied);
}

fn enter_focused(tab: &mut Tab, store: &NoteStore) {
    match tab.activate() {
        Activation::Descend(ticket) => {
            assert_eq!(tab.complete_fetch(&ticket, fetch(store, &ticket)), NavOutcome::Applied);
        }
        other => panic!("expected a descend, got {:?}", other),
    }
}

fn focused_title(tab: &Tab) -> String {
    tab.focused_item().map(|i| i.title.clone()).unwrap_or_default()
}

#[test]
fn test_browse_down_and_back_up() {
    let store = demo_store();
    let mut tab = Tab::new(1, "Tab 1");

    load_root(&mut tab, &store);
    assert_eq!(tab.depth(), Some(0));
    assert_eq!(focused_title(&tab), "Documents");

    enter_focused(&mut tab, &store); // Documents
    assert_eq!(tab.title(), "Documents");
    assert_eq!(focused_title(&tab), "Personal");

    tab.move_focus_with(next_selection);
    assert_eq!(focused_title(&tab), "Work");
    enter_focused(&mut tab, &store); // Work
    assert_eq!(tab.depth(), Some(2));
    let titles: Vec<_> = tab.visible_columns().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Notes", "Documents", "Work"]);

    // Leaving keeps the deeper column around
    assert!(tab.go_shallower());
    assert_eq!(tab.depth(), Some(1));
    assert_eq!(tab.columns().len(), 3);
    assert_eq!(focused_title(&tab), "Work");
    assert!(tab.invariants_hold());
}

#[test]
fn test_focus_memory_survives_reentry() {
    let store = demo_store();
    let mut tab = Tab::new(1, "Tab 1");
    load_root(&mut tab, &store);

    enter_focused(&mut tab, &store); // Documents
    tab.move_focus_with(next_selection); // Work
    enter_focused(&mut tab, &store);

    // Project A, Project B, Meeting Notes: move to the note
    tab.move_focus_with(prev_selection);
    assert_eq!(focused_title(&tab), "Meeting Notes");

    tab.go_shallower();
    tab.go_shallower();
    assert_eq!(tab.depth(), Some(0));

    // Re-enter Documents then Work: both focus positions come back
    enter_focused(&mut tab, &store);
    assert_eq!(focused_title(&tab), "Work");
    enter_focused(&mut tab, &store);
    assert_eq!(focused_title(&tab), "Meeting Notes");
}

#[test]
fn test_descend_into_sibling_drops_retained_columns() {
    let store = demo_store();
    let mut tab = Tab::new(1, "Tab 1");
    load_root(&mut tab, &store);

    enter_focused(&mut tab, &store); // Documents
    enter_focused(&mut tab, &store); // Personal
    assert_eq!(tab.columns().len(), 3);

    tab.go_shallower();
    tab.move_focus_with(next_selection); // Work
    enter_focused(&mut tab, &store);

    assert_eq!(tab.columns().len(), 3);
    assert_eq!(tab.title(), "Work");
}

#[test]
fn test_second_activation_refused_while_in_flight() {
    let store = demo_store();
    let mut tab = Tab::new(1, "Tab 1");
    load_root(&mut tab, &store);

    let Activation::Descend(first) = tab.activate() else {
        panic!("expected a descend");
    };
    assert_eq!(tab.activate(), Activation::Nothing);
    assert!(!tab.go_shallower());

    assert_eq!(tab.complete_fetch(&first, fetch(&store, &first)), NavOutcome::Applied);
    assert!(!tab.is_navigating());
}

#[test]
fn test_failed_descend_leaves_stack_untouched() {
    let store = demo_store();
    let mut tab = Tab::new(1, "Tab 1");
    load_root(&mut tab, &store);

    let Activation::Descend(ticket) = tab.activate() else {
        panic!("expected a descend");
    };
    let outcome = tab.complete_fetch(&ticket, Err(anyhow::anyhow!("database is locked")));

    assert_eq!(outcome, NavOutcome::Failed);
    assert_eq!(tab.depth(), Some(0));
    assert_eq!(tab.columns().len(), 1);
    assert!(!tab.is_navigating());
}

#[test]
fn test_notes_open_instead_of_descending() {
    let store = demo_store();
    let mut tab = Tab::new(1, "Tab 1");
    load_root(&mut tab, &store);

    // Inbox is the only note at the root and sorts last
    tab.move_focus_with(prev_selection);
    match tab.activate() {
        Activation::OpenNote(item) => assert_eq!(item.title, "Inbox"),
        other => panic!("expected open, got {:?}", other),
    }
    assert_eq!(tab.depth(), Some(0));
}
