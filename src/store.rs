use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::repo::{Item, ItemKind, MoveOutcome, Repository};

/// SQLite-backed note/folder tree
pub struct NoteStore {
    conn: Mutex<Connection>,
}

impl NoteStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open note database at {}", path.display()))?;
        Self::from_connection(conn)
    }

    pub fn new_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = NoteStore {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("note database lock poisoned"))
    }

    fn init_schema(&self) -> Result<()> {
        self.conn()?.execute_batch(
            "
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS items (
                id TEXT PRIMARY KEY,
                kind TEXT NOT NULL CHECK (kind IN ('note', 'folder')),
                title TEXT NOT NULL,
                parent_id TEXT REFERENCES items (id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS items_parent ON items (parent_id);
            ",
        )?;
        Ok(())
    }

    fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<(String, String, String, Option<String>)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    }

    fn into_item(raw: (String, String, String, Option<String>)) -> Result<Item> {
        let (id, kind, title, parent_id) = raw;
        let kind = ItemKind::parse(&kind)
            .ok_or_else(|| anyhow::anyhow!("Unknown item kind '{}' for {}", kind, id))?;
        Ok(Item {
            id,
            kind,
            title,
            parent_id,
        })
    }

    fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }

    fn insert(&self, kind: ItemKind, title: &str, parent_id: Option<&str>) -> Result<Item> {
        let conn = self.conn()?;
        if let Some(parent) = parent_id {
            if !Self::is_folder(&conn, parent)? {
                anyhow::bail!("Parent {} is not a folder", parent);
            }
        }
        let now = Self::now();
        let id: String = conn.query_row(
            "INSERT INTO items (id, kind, title, parent_id, created_at, updated_at)
             VALUES (lower(hex(randomblob(16))), ?1, ?2, ?3, ?4, ?4)
             RETURNING id",
            params![kind.as_str(), title, parent_id, now],
            |row| row.get(0),
        )?;
        Ok(Item {
            id,
            kind,
            title: title.to_string(),
            parent_id: parent_id.map(str::to_string),
        })
    }

    /// Insert with a caller-chosen id (seed data and tests)
    pub fn insert_with_id(
        &self,
        id: &str,
        kind: ItemKind,
        title: &str,
        parent_id: Option<&str>,
    ) -> Result<Item> {
        let now = Self::now();
        self.conn()?.execute(
            "INSERT OR IGNORE INTO items (id, kind, title, parent_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![id, kind.as_str(), title, parent_id, now],
        )?;
        Ok(Item {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            parent_id: parent_id.map(str::to_string),
        })
    }

    pub fn is_empty(&self) -> Result<bool> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        Ok(count == 0)
    }

    fn is_folder(conn: &Connection, id: &str) -> Result<bool> {
        let kind: Option<String> = conn
            .query_row("SELECT kind FROM items WHERE id = ?1", params![id], |row| row.get(0))
            .optional()?;
        Ok(kind.as_deref() == Some("folder"))
    }

    /// Whether `candidate` is `id` or lies somewhere below it
    fn is_self_or_descendant(conn: &Connection, id: &str, candidate: &str) -> Result<bool> {
        let found: i64 = conn.query_row(
            "WITH RECURSIVE subtree(id) AS (
                 SELECT ?1
                 UNION
                 SELECT items.id FROM items JOIN subtree ON items.parent_id = subtree.id
             )
             SELECT COUNT(*) FROM subtree WHERE id = ?2",
            params![id, candidate],
            |row| row.get(0),
        )?;
        Ok(found > 0)
    }

    fn move_one(conn: &Connection, id: &str, kind: ItemKind, new_parent_id: Option<&str>) -> Result<bool> {
        let current: Option<String> = conn
            .query_row("SELECT kind FROM items WHERE id = ?1", params![id], |row| row.get(0))
            .optional()?;
        if current.as_deref() != Some(kind.as_str()) {
            return Ok(false);
        }

        if let Some(target) = new_parent_id {
            if !Self::is_folder(conn, target)? {
                return Ok(false);
            }
            if kind == ItemKind::Folder && Self::is_self_or_descendant(conn, id, target)? {
                return Ok(false);
            }
        }

        let changed = conn.execute(
            "UPDATE items SET parent_id = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, new_parent_id, Self::now()],
        )?;
        Ok(changed == 1)
    }

    fn rename_kind(&self, kind: ItemKind, id: &str, new_title: &str) -> Result<()> {
        let changed = self.conn()?.execute(
            "UPDATE items SET title = ?3, updated_at = ?4 WHERE id = ?1 AND kind = ?2",
            params![id, kind.as_str(), new_title, Self::now()],
        )?;
        if changed == 0 {
            anyhow::bail!("No {} with id {}", kind.as_str(), id);
        }
        Ok(())
    }

    fn delete_kind(&self, kind: ItemKind, id: &str) -> Result<()> {
        let changed = self.conn()?.execute(
            "DELETE FROM items WHERE id = ?1 AND kind = ?2",
            params![id, kind.as_str()],
        )?;
        if changed == 0 {
            anyhow::bail!("No {} with id {}", kind.as_str(), id);
        }
        Ok(())
    }
}

impl Repository for NoteStore {
    fn get_children(&self, folder_id: Option<&str>) -> Result<Vec<Item>> {
        let conn = self.conn()?;
        if let Some(folder) = folder_id {
            if !Self::is_folder(&conn, folder)? {
                anyhow::bail!("Folder not found: {}", folder);
            }
        }
        let mut stmt = conn.prepare(
            "SELECT id, kind, title, parent_id FROM items
             WHERE parent_id IS ?1
             ORDER BY kind = 'note', title COLLATE NOCASE, id",
        )?;
        let rows = stmt
            .query_map(params![folder_id], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(Self::into_item).collect()
    }

    fn list_all(&self) -> Result<Vec<Item>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, kind, title, parent_id FROM items ORDER BY title COLLATE NOCASE, id",
        )?;
        let rows = stmt
            .query_map([], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(Self::into_item).collect()
    }

    fn create_note(&self, title: &str, parent_id: Option<&str>) -> Result<Item> {
        self.insert(ItemKind::Note, title, parent_id)
    }

    fn create_folder(&self, title: &str, parent_id: Option<&str>) -> Result<Item> {
        self.insert(ItemKind::Folder, title, parent_id)
    }

    fn rename_note(&self, id: &str, new_title: &str) -> Result<()> {
        self.rename_kind(ItemKind::Note, id, new_title)
    }

    fn rename_folder(&self, id: &str, new_title: &str) -> Result<()> {
        self.rename_kind(ItemKind::Folder, id, new_title)
    }

    fn delete_note(&self, id: &str) -> Result<()> {
        self.delete_kind(ItemKind::Note, id)
    }

    fn delete_folder(&self, id: &str) -> Result<()> {
        // Subtree goes with it via ON DELETE CASCADE
        self.delete_kind(ItemKind::Folder, id)
    }

    fn move_item(&self, id: &str, kind: ItemKind, new_parent_id: Option<&str>) -> Result<bool> {
        let conn = self.conn()?;
        Self::move_one(&conn, id, kind, new_parent_id)
    }

    fn move_items(
        &self,
        items: &[(String, ItemKind)],
        new_parent_id: Option<&str>,
    ) -> Result<MoveOutcome> {
        let conn = self.conn()?;
        let tx = conn.unchecked_transaction()?;
        let mut moved = Vec::new();
        for (id, kind) in items {
            if Self::move_one(&tx, id, *kind, new_parent_id)? {
                moved.push(id.clone());
            }
        }
        tx.commit()?;
        Ok(MoveOutcome { moved })
    }
}

/// Demo hierarchy inserted by `--seed`
const SEED_ITEMS: &[(&str, ItemKind, &str, Option<&str>)] = &[
    ("1", ItemKind::Folder, "Documents", None),
    ("2", ItemKind::Folder, "Pictures", None),
    ("3", ItemKind::Folder, "Videos", None),
    ("4", ItemKind::Folder, "Music", None),
    ("1-1", ItemKind::Folder, "Work", Some("1")),
    ("1-2", ItemKind::Folder, "Personal", Some("1")),
    ("1-1-1", ItemKind::Folder, "Project A", Some("1-1")),
    ("1-1-2", ItemKind::Folder, "Project B", Some("1-1")),
    ("1-1-3", ItemKind::Note, "Meeting Notes", Some("1-1")),
    ("1-2-1", ItemKind::Note, "Tax Documents", Some("1-2")),
    ("1-2-2", ItemKind::Note, "Insurance", Some("1-2")),
    ("1-2-3", ItemKind::Folder, "Receipts", Some("1-2")),
    ("1-1-2-1", ItemKind::Note, "Design Files", Some("1-1-2")),
    ("1-1-2-2", ItemKind::Note, "Code Review", Some("1-1-2")),
    ("1-2-3-1", ItemKind::Note, "2023", Some("1-2-3")),
    ("1-2-3-2", ItemKind::Note, "2024", Some("1-2-3")),
    ("2-1", ItemKind::Folder, "Vacation", Some("2")),
    ("2-2", ItemKind::Folder, "Family", Some("2")),
    ("2-3", ItemKind::Note, "Screenshots", Some("2")),
    ("2-1-1", ItemKind::Note, "Beach Trip 2023", Some("2-1")),
    ("2-1-2", ItemKind::Note, "Mountain Hike 2024", Some("2-1")),
    ("2-2-1", ItemKind::Note, "Birthday Party", Some("2-2")),
    ("2-2-2", ItemKind::Note, "Christmas 2023", Some("2-2")),
    ("3-1", ItemKind::Note, "Tutorials", Some("3")),
    ("3-2", ItemKind::Folder, "Movies", Some("3")),
    ("3-3", ItemKind::Note, "Personal", Some("3")),
    ("3-2-1", ItemKind::Note, "Action", Some("3-2")),
    ("3-2-2", ItemKind::Note, "Comedy", Some("3-2")),
    ("3-2-3", ItemKind::Note, "Documentary", Some("3-2")),
    ("5", ItemKind::Note, "Inbox", None),
];

/// Populate an empty store with the demo hierarchy. Returns the number inserted.
pub fn seed_demo_tree(store: &NoteStore) -> Result<usize> {
    if !store.is_empty()? {
        return Ok(0);
    }
    for (id, kind, title, parent) in SEED_ITEMS {
        store.insert_with_id(id, *kind, title, *parent)?;
    }
    Ok(SEED_ITEMS.len())
}
