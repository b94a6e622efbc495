//! Session restore
//!
//! Rebuilds a Column Stack from a persisted [`ListState`]: root first, then
//! each folder of the saved path in order, stopping at the first ancestor that
//! no longer exists.

use anyhow::{Context, Result};

use crate::model::types::{folder_key, Column};
use crate::repo::Repository;
use crate::session::ListState;

/// Columns plus the focus pairs to merge into Focus Memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredStack {
    pub columns: Vec<Column>,
    pub focus: Vec<(String, usize)>,
}

/// Rebuild the stack described by `state`
///
/// A failed root fetch is an error. Anything deeper only shortens the
/// restored path.
pub fn restore_columns(repo: &dyn Repository, state: &ListState) -> Result<RestoredStack> {
    let remembered = |key: &str| state.focused_by_folder.get(key).copied().unwrap_or(0);

    let root_items = repo.get_children(None).context("Failed to load root folder")?;
    let mut columns = vec![Column::root(root_items, remembered(&folder_key(None)))];

    for folder_id in &state.path {
        let Some(parent) = columns.last_mut() else {
            break;
        };
        let Some(index) = parent.index_of(folder_id) else {
            tracing::info!("restore: folder {} no longer in {}, stopping", folder_id, parent.key());
            break;
        };
        let folder = parent.items[index].clone();
        if !folder.is_folder() {
            break;
        }
        parent.set_focus(index);

        let children = match repo.get_children(Some(&folder.id)) {
            Ok(children) => children,
            Err(e) => {
                tracing::warn!("restore: failed to load {}: {:#}", folder.id, e);
                break;
            }
        };
        let focus = remembered(&folder.id);
        columns.push(Column::new(Some(folder.id), folder.title, children, focus));
    }

    let mut focus: Vec<(String, usize)> = state
        .focused_by_folder
        .iter()
        .map(|(k, v)| (k.clone(), *v))
        .collect();
    focus.sort();

    Ok(RestoredStack { columns, focus })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::ItemKind;
    use crate::store::NoteStore;
    use std::collections::HashMap;

    fn store() -> NoteStore {
        let store = NoteStore::new_in_memory().unwrap();
        store.insert_with_id("A", ItemKind::Folder, "A", None).unwrap();
        store.insert_with_id("n", ItemKind::Note, "n", None).unwrap();
        store.insert_with_id("B", ItemKind::Folder, "B", Some("A")).unwrap();
        store.insert_with_id("b1", ItemKind::Note, "b1", Some("B")).unwrap();
        store.insert_with_id("b2", ItemKind::Note, "b2", Some("B")).unwrap();
        store
    }

    #[test]
    fn test_restore_full_path() {
        let state = ListState {
            path: vec!["A".into(), "B".into()],
            focused_by_folder: HashMap::from([("B".to_string(), 1)]),
        };
        let restored = restore_columns(&store(), &state).unwrap();
        let folders: Vec<_> = restored.columns.iter().map(|c| c.folder_id.as_deref()).collect();
        assert_eq!(folders, vec![None, Some("A"), Some("B")]);
        assert_eq!(restored.columns[0].focused_index, 0);
        assert_eq!(restored.columns[2].focused_index, 1);
        assert_eq!(restored.focus, vec![("B".to_string(), 1)]);
    }

    #[test]
    fn test_restore_stops_at_missing_folder() {
        let state = ListState {
            path: vec!["A".into(), "gone".into(), "B".into()],
            focused_by_folder: HashMap::new(),
        };
        let restored = restore_columns(&store(), &state).unwrap();
        assert_eq!(restored.columns.len(), 2);
    }

    #[test]
    fn test_restore_empty_state_is_root() {
        let restored = restore_columns(&store(), &ListState::default()).unwrap();
        assert_eq!(restored.columns.len(), 1);
        assert_eq!(restored.columns[0].title, "Notes");
    }
}
