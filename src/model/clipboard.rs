//! Mark / Cut Buffer
//!
//! Multi-select marks and the staged move operation.

use std::collections::HashSet;

use crate::repo::Item;

/// Marked items keyed by id, in the order they were marked
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkSet {
    items: Vec<Item>,
    ids: HashSet<String>,
}

impl MarkSet {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Idempotent add
    pub fn mark(&mut self, item: &Item) -> bool {
        if !self.ids.insert(item.id.clone()) {
            return false;
        }
        self.items.push(item.clone());
        true
    }

    pub fn unmark(&mut self, id: &str) -> bool {
        if !self.ids.remove(id) {
            return false;
        }
        self.items.retain(|i| i.id != id);
        true
    }

    /// Returns whether the item is marked afterwards
    pub fn toggle(&mut self, item: &Item) -> bool {
        if self.contains(&item.id) {
            self.unmark(&item.id);
            false
        } else {
            self.mark(item);
            true
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }

    fn take(&mut self) -> Vec<Item> {
        self.ids.clear();
        std::mem::take(&mut self.items)
    }
}

/// Items staged for a move and the folders they came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CutBuffer {
    pub items: Vec<Item>,
    pub source_folder_ids: HashSet<Option<String>>,
}

impl CutBuffer {
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }
}

/// What Escape did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeOutcome {
    ClearedMarks,
    ClearedCut,
    /// Nothing staged: the browser itself should close
    Close,
}

#[derive(Clone, Debug, Default)]
pub struct Clipboard {
    pub marks: MarkSet,
    cut: Option<CutBuffer>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cut_buffer(&self) -> Option<&CutBuffer> {
        self.cut.as_ref()
    }

    pub fn has_cut(&self) -> bool {
        self.cut.is_some()
    }

    /// Stage the marked items, or the focused one when nothing is marked.
    /// Returns the number of staged items.
    pub fn cut_marked_or_focused(&mut self, focused: Option<&Item>, column_folder: Option<&str>) -> usize {
        if !self.marks.is_empty() {
            let items = self.marks.take();
            let source_folder_ids = items.iter().map(|i| i.parent_id.clone()).collect();
            let count = items.len();
            self.cut = Some(CutBuffer {
                items,
                source_folder_ids,
            });
            return count;
        }

        match focused {
            Some(item) => {
                self.cut = Some(CutBuffer {
                    items: vec![item.clone()],
                    source_folder_ids: HashSet::from([column_folder.map(str::to_string)]),
                });
                1
            }
            None => 0,
        }
    }

    /// Remove the staged buffer for a paste. The buffer is gone whatever the
    /// paste outcome.
    pub fn take_cut(&mut self) -> Option<CutBuffer> {
        self.cut.take()
    }

    pub fn escape(&mut self) -> EscapeOutcome {
        if !self.marks.is_empty() {
            self.marks.clear();
            EscapeOutcome::ClearedMarks
        } else if self.cut.take().is_some() {
            EscapeOutcome::ClearedCut
        } else {
            EscapeOutcome::Close
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::ItemKind;

    fn note(id: &str, parent: Option<&str>) -> Item {
        Item {
            id: id.to_string(),
            kind: ItemKind::Note,
            title: id.to_string(),
            parent_id: parent.map(str::to_string),
        }
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut marks = MarkSet::default();
        assert!(marks.mark(&note("a", None)));
        assert!(!marks.mark(&note("a", None)));
        assert_eq!(marks.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut marks = MarkSet::default();
        assert!(marks.toggle(&note("a", None)));
        assert!(!marks.toggle(&note("a", None)));
        assert!(marks.is_empty());
    }

    #[test]
    fn test_cut_marked_records_distinct_sources() {
        let mut clip = Clipboard::new();
        clip.marks.mark(&note("a", Some("f1")));
        clip.marks.mark(&note("b", Some("f1")));
        clip.marks.mark(&note("c", None));

        assert_eq!(clip.cut_marked_or_focused(Some(&note("z", Some("f9"))), Some("f9")), 3);
        assert!(clip.marks.is_empty());

        let buffer = clip.cut_buffer().unwrap();
        assert_eq!(buffer.items.len(), 3);
        assert_eq!(
            buffer.source_folder_ids,
            HashSet::from([Some("f1".to_string()), None])
        );
        assert!(!buffer.contains("z"));
    }

    #[test]
    fn test_cut_focused_uses_column_folder() {
        let mut clip = Clipboard::new();
        assert_eq!(clip.cut_marked_or_focused(Some(&note("a", Some("f1"))), Some("f1")), 1);
        let buffer = clip.cut_buffer().unwrap();
        assert_eq!(buffer.source_folder_ids, HashSet::from([Some("f1".to_string())]));
    }

    #[test]
    fn test_cut_with_nothing_focused() {
        let mut clip = Clipboard::new();
        assert_eq!(clip.cut_marked_or_focused(None, None), 0);
        assert!(!clip.has_cut());
    }

    #[test]
    fn test_escape_order() {
        let mut clip = Clipboard::new();
        clip.cut_marked_or_focused(Some(&note("a", None)), None);
        clip.marks.mark(&note("b", None));

        assert_eq!(clip.escape(), EscapeOutcome::ClearedMarks);
        assert_eq!(clip.escape(), EscapeOutcome::ClearedCut);
        assert_eq!(clip.escape(), EscapeOutcome::Close);
    }
}
