//! Tab Manager
//!
//! The set of open tabs plus which one is active. There is always at least
//! one tab; closing the last one is refused.

use super::tab::Tab;
use super::types::TabId;
use crate::repo::Item;

#[derive(Clone, Debug)]
pub struct TabManager {
    tabs: Vec<Tab>,
    active: usize,
    next_id: TabId,
}

impl TabManager {
    pub fn new() -> Self {
        Self {
            tabs: vec![Tab::new(1, "Tab 1")],
            active: 0,
            next_id: 2,
        }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Tab {
        &self.tabs[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active]
    }

    /// The first tab, whose position is persisted across sessions
    pub fn primary(&self) -> &Tab {
        &self.tabs[0]
    }

    pub fn primary_mut(&mut self) -> &mut Tab {
        &mut self.tabs[0]
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut [Tab] {
        &mut self.tabs
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id() == id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id() == id)
    }

    pub fn is_primary(&self, id: TabId) -> bool {
        self.tabs[0].id() == id
    }

    /// Open a new pre-load tab after the active one and activate it
    pub fn open_tab(&mut self) -> TabId {
        let id = self.next_id;
        self.next_id += 1;
        let insert_at = self.active + 1;
        self.tabs.insert(insert_at, Tab::new(id, format!("Tab {}", id)));
        self.active = insert_at;
        id
    }

    /// Close the active tab. Refused when it is the last one.
    pub fn close_active(&mut self) -> Option<TabId> {
        if self.tabs.len() <= 1 {
            return None;
        }
        let removed = self.tabs.remove(self.active);
        if self.active >= self.tabs.len() {
            self.active = self.tabs.len() - 1;
        }
        Some(removed.id())
    }

    pub fn next(&mut self) -> bool {
        if self.tabs.len() <= 1 {
            return false;
        }
        self.active = (self.active + 1) % self.tabs.len();
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.tabs.len() <= 1 {
            return false;
        }
        self.active = if self.active == 0 {
            self.tabs.len() - 1
        } else {
            self.active - 1
        };
        true
    }

    /// Push a listing into every column of every tab that shows `folder_id`.
    /// Returns the ids of the tabs that changed.
    pub fn apply_listing_everywhere(&mut self, folder_id: Option<&str>, items: &[Item]) -> Vec<TabId> {
        self.tabs
            .iter_mut()
            .filter_map(|tab| tab.apply_listing(folder_id, items).then(|| tab.id()))
            .collect()
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_one_tab() {
        let tabs = TabManager::new();
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs.active().id(), 1);
    }

    #[test]
    fn test_cannot_close_last_tab() {
        let mut tabs = TabManager::new();
        assert_eq!(tabs.close_active(), None);
        assert_eq!(tabs.len(), 1);
    }

    #[test]
    fn test_open_inserts_after_active() {
        let mut tabs = TabManager::new();
        let second = tabs.open_tab();
        tabs.prev();
        let third = tabs.open_tab();
        let ids: Vec<_> = tabs.tabs().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![1, third, second]);
        assert_eq!(tabs.active().id(), third);
    }

    #[test]
    fn test_close_moves_to_neighbour() {
        let mut tabs = TabManager::new();
        tabs.open_tab();
        let last = tabs.open_tab();
        assert_eq!(tabs.close_active(), Some(last));
        assert_eq!(tabs.active_index(), 1);
        assert_eq!(tabs.len(), 2);
    }

    #[test]
    fn test_next_prev_wrap() {
        let mut tabs = TabManager::new();
        assert!(!tabs.next());
        tabs.open_tab();
        tabs.open_tab();
        assert_eq!(tabs.active_index(), 2);
        tabs.next();
        assert_eq!(tabs.active_index(), 0);
        tabs.prev();
        assert_eq!(tabs.active_index(), 2);
    }

    #[test]
    fn test_primary_is_first_tab() {
        let mut tabs = TabManager::new();
        tabs.open_tab();
        assert!(tabs.is_primary(1));
        assert_eq!(tabs.primary().id(), 1);
    }
}
