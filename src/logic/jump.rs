//! Jump Resolver
//!
//! Reconstructs the ancestor chain of a search hit from a flat parent index and
//! rebuilds a Column Stack scoped at the column the jump started from.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};

use crate::model::tab::JumpPlan;
use crate::model::types::Column;
use crate::repo::{Item, Repository};

/// Reverse map `id -> parent id` over the loaded index
pub fn parent_index(items: &[Item]) -> HashMap<String, Option<String>> {
    items
        .iter()
        .map(|item| (item.id.clone(), item.parent_id.clone()))
        .collect()
}

/// Folder ids between `base_folder` (exclusive) and the target (exclusive),
/// top-down. `None` when the walk falls off the index, reaches the root
/// without meeting the base, or loops.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use notefinder::logic::jump::ancestor_path;
///
/// let index: HashMap<String, Option<String>> = [
///     ("a".to_string(), None),
///     ("b".to_string(), Some("a".to_string())),
///     ("c".to_string(), Some("b".to_string())),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(ancestor_path(&index, "c", None), Some(vec!["a".to_string(), "b".to_string()]));
/// assert_eq!(ancestor_path(&index, "c", Some("a")), Some(vec!["b".to_string()]));
/// assert_eq!(ancestor_path(&index, "a", Some("b")), None);
/// ```
pub fn ancestor_path(
    index: &HashMap<String, Option<String>>,
    target_id: &str,
    base_folder: Option<&str>,
) -> Option<Vec<String>> {
    let mut current = index.get(target_id)?.clone();
    let mut path = Vec::new();
    let mut seen = HashSet::new();

    while current.as_deref() != base_folder {
        let id = current?;
        if !seen.insert(id.clone()) {
            return None;
        }
        current = index.get(&id)?.clone();
        path.push(id);
    }

    path.reverse();
    Some(path)
}

/// Walk `ancestors` down from a clone of `base`, fetching each level
///
/// Each ancestor must be a folder present in the previous column; the target
/// must be present in the last one. Any miss is `Ok(None)` and nothing is
/// committed. Fetch errors propagate.
pub fn rebuild_scoped_stack(
    repo: &dyn Repository,
    base: &Column,
    ancestors: &[String],
    target_id: &str,
) -> Result<Option<JumpPlan>> {
    let mut columns = vec![base.clone()];
    let mut focus = Vec::with_capacity(ancestors.len() + 1);

    for ancestor in ancestors {
        let Some(current) = columns.last_mut() else {
            return Ok(None);
        };
        let Some(index) = current.index_of(ancestor) else {
            tracing::debug!("jump: ancestor {} not in column {}", ancestor, current.key());
            return Ok(None);
        };
        let folder = current.items[index].clone();
        if !folder.is_folder() {
            return Ok(None);
        }
        current.set_focus(index);
        focus.push((current.key(), index));

        let children = repo
            .get_children(Some(&folder.id))
            .with_context(|| format!("Failed to load '{}' while jumping", folder.title))?;
        columns.push(Column::new(Some(folder.id), folder.title, children, 0));
    }

    let Some(last) = columns.last_mut() else {
        return Ok(None);
    };
    let Some(index) = last.index_of(target_id) else {
        tracing::debug!("jump: target {} not in column {}", target_id, last.key());
        return Ok(None);
    };
    last.set_focus(index);
    focus.push((last.key(), index));

    Ok(Some(JumpPlan { columns, focus }))
}

/// Resolve the ancestor path against `index` and rebuild from `base`
pub fn plan_jump(
    repo: &dyn Repository,
    index: &HashMap<String, Option<String>>,
    base: &Column,
    target_id: &str,
) -> Result<Option<JumpPlan>> {
    let Some(ancestors) = ancestor_path(index, target_id, base.folder_id.as_deref()) else {
        tracing::debug!("jump: no path from {} to {}", base.key(), target_id);
        return Ok(None);
    };
    rebuild_scoped_stack(repo, base, &ancestors, target_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::ItemKind;
    use crate::store::NoteStore;

    fn chain_store() -> NoteStore {
        let store = NoteStore::new_in_memory().unwrap();
        store.insert_with_id("A", ItemKind::Folder, "A", None).unwrap();
        store.insert_with_id("x", ItemKind::Note, "x", None).unwrap();
        store.insert_with_id("B", ItemKind::Folder, "B", Some("A")).unwrap();
        store.insert_with_id("C", ItemKind::Note, "C", Some("B")).unwrap();
        store
    }

    #[test]
    fn test_cycle_is_rejected() {
        let index: HashMap<String, Option<String>> = [
            ("a".to_string(), Some("b".to_string())),
            ("b".to_string(), Some("a".to_string())),
            ("t".to_string(), Some("a".to_string())),
        ]
        .into_iter()
        .collect();
        assert_eq!(ancestor_path(&index, "t", None), None);
    }

    #[test]
    fn test_unknown_target() {
        let index = HashMap::new();
        assert_eq!(ancestor_path(&index, "t", None), None);
    }

    #[test]
    fn test_target_directly_in_base() {
        let index: HashMap<String, Option<String>> =
            [("t".to_string(), Some("f".to_string()))].into_iter().collect();
        assert_eq!(ancestor_path(&index, "t", Some("f")), Some(vec![]));
    }

    #[test]
    fn test_rebuild_from_root() {
        let store = chain_store();
        let root = Column::root(store.get_children(None).unwrap(), 1);
        let index = parent_index(&store.list_all().unwrap());

        let plan = plan_jump(&store, &index, &root, "C").unwrap().unwrap();

        let folders: Vec<_> = plan.columns.iter().map(|c| c.folder_id.as_deref()).collect();
        assert_eq!(folders, vec![None, Some("A"), Some("B")]);
        assert_eq!(plan.columns[0].focused_item().unwrap().id, "A");
        assert_eq!(plan.columns[1].focused_item().unwrap().id, "B");
        assert_eq!(plan.columns[2].focused_item().unwrap().id, "C");
        assert_eq!(
            plan.focus,
            vec![
                ("root".to_string(), 0),
                ("A".to_string(), 0),
                ("B".to_string(), 0)
            ]
        );
    }

    #[test]
    fn test_target_outside_base_aborts() {
        let store = chain_store();
        let b = Column::new(Some("B".into()), "B", store.get_children(Some("B")).unwrap(), 0);
        let index = parent_index(&store.list_all().unwrap());
        assert_eq!(plan_jump(&store, &index, &b, "x").unwrap(), None);
    }

    #[test]
    fn test_stale_base_column_aborts() {
        let store = chain_store();
        // Base column that no longer lists A
        let root = Column::root(vec![], 0);
        let index = parent_index(&store.list_all().unwrap());
        assert_eq!(plan_jump(&store, &index, &root, "C").unwrap(), None);
    }

    #[test]
    fn test_fetch_failure_propagates() {
        let store = chain_store();
        let root = Column::root(store.get_children(None).unwrap(), 0);
        store.delete_folder("A").unwrap();
        // Index still believes A exists
        let ancestors = vec!["A".to_string(), "B".to_string()];
        assert!(rebuild_scoped_stack(&store, &root, &ancestors, "C").is_err());
    }
}
