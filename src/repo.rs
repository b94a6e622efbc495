//! Repository client contract
//!
//! Items are immutable snapshots of notes and folders. The navigation core only
//! talks to storage through the [`Repository`] trait so the SQLite store and the
//! test doubles are interchangeable.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Note,
    Folder,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Note => "note",
            ItemKind::Folder => "folder",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "note" => Some(ItemKind::Note),
            "folder" => Some(ItemKind::Folder),
            _ => None,
        }
    }
}

/// A note or folder as returned by the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub title: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
}

impl Item {
    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }

    /// Whether this item currently lives in `folder_id` (None = root)
    pub fn is_in(&self, folder_id: Option<&str>) -> bool {
        self.parent_id.as_deref() == folder_id
    }
}

/// Result of a batch move
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub moved: Vec<String>,
}

/// Storage operations consumed by the browser
///
/// Implementations must be safe to call from the blocking pool, hence
/// `Send + Sync`. Every call may fail; callers decide how a failure degrades.
pub trait Repository: Send + Sync {
    /// Children of a folder (None = root), folders first then by title
    fn get_children(&self, folder_id: Option<&str>) -> Result<Vec<Item>>;

    /// Every item in the store, used as the jump-to index
    fn list_all(&self) -> Result<Vec<Item>>;

    fn create_note(&self, title: &str, parent_id: Option<&str>) -> Result<Item>;
    fn create_folder(&self, title: &str, parent_id: Option<&str>) -> Result<Item>;

    fn rename_note(&self, id: &str, new_title: &str) -> Result<()>;
    fn rename_folder(&self, id: &str, new_title: &str) -> Result<()>;

    fn delete_note(&self, id: &str) -> Result<()>;
    fn delete_folder(&self, id: &str) -> Result<()>;

    /// Move one item. `Ok(false)` means the store refused the move.
    fn move_item(&self, id: &str, kind: ItemKind, new_parent_id: Option<&str>) -> Result<bool>;

    /// Move several items; the outcome lists the ids that actually moved
    fn move_items(
        &self,
        items: &[(String, ItemKind)],
        new_parent_id: Option<&str>,
    ) -> Result<MoveOutcome>;

    fn create(&self, kind: ItemKind, title: &str, parent_id: Option<&str>) -> Result<Item> {
        match kind {
            ItemKind::Note => self.create_note(title, parent_id),
            ItemKind::Folder => self.create_folder(title, parent_id),
        }
    }

    fn rename(&self, kind: ItemKind, id: &str, new_title: &str) -> Result<()> {
        match kind {
            ItemKind::Note => self.rename_note(id, new_title),
            ItemKind::Folder => self.rename_folder(id, new_title),
        }
    }

    fn delete(&self, kind: ItemKind, id: &str) -> Result<()> {
        match kind {
            ItemKind::Note => self.delete_note(id),
            ItemKind::Folder => self.delete_folder(id),
        }
    }
}
