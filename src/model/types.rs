//! Shared types for the Model
//!
//! These types are used across multiple sub-models and represent
//! fundamental domain concepts.

use crate::repo::Item;

/// Focus Memory key for the root folder
pub const ROOT_KEY: &str = "root";

/// Memoization key for a folder: its id, or [`ROOT_KEY`] for the root
pub fn folder_key(folder_id: Option<&str>) -> String {
    folder_id.unwrap_or(ROOT_KEY).to_string()
}

/// Stable identity of a tab, independent of its position
pub type TabId = u64;

/// One level of the folder path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub folder_id: Option<String>,
    pub items: Vec<Item>,
    pub focused_index: usize,
    pub title: String,
}

impl Column {
    /// Build a column, clamping `focused_index` into the item range
    pub fn new(folder_id: Option<String>, title: impl Into<String>, items: Vec<Item>, focused_index: usize) -> Self {
        let focused_index = crate::logic::navigation::clamp_index(focused_index, items.len());
        Self {
            folder_id,
            items,
            focused_index,
            title: title.into(),
        }
    }

    pub fn root(items: Vec<Item>, focused_index: usize) -> Self {
        Self::new(None, "Notes", items, focused_index)
    }

    pub fn key(&self) -> String {
        folder_key(self.folder_id.as_deref())
    }

    pub fn shows_folder(&self, folder_id: Option<&str>) -> bool {
        self.folder_id.as_deref() == folder_id
    }

    pub fn focused_item(&self) -> Option<&Item> {
        self.items.get(self.focused_index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Replace the listing, keeping the focused item when it survived and
    /// clamping otherwise
    pub fn replace_items(&mut self, items: Vec<Item>) {
        let keep = self
            .focused_item()
            .and_then(|focused| items.iter().position(|item| item.id == focused.id));
        let index = keep.unwrap_or(self.focused_index);
        self.items = items;
        self.focused_index = crate::logic::navigation::clamp_index(index, self.items.len());
    }

    /// Set focus (clamped); returns the index actually stored
    pub fn set_focus(&mut self, index: usize) -> usize {
        self.focused_index = crate::logic::navigation::clamp_index(index, self.items.len());
        self.focused_index
    }
}

/// Cached children of the focused folder in the active column
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
    pub folder_id: String,
    pub items: Vec<Item>,
}
