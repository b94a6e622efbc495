use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Persisted position of the primary tab
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListState {
    /// Non-root folder ids from the root down to the active column
    pub path: Vec<String>,
    #[serde(rename = "focusedByFolder")]
    pub focused_by_folder: HashMap<String, usize>,
}

/// Key under which the list state is stored
pub fn list_state_key(app_name: &str) -> String {
    format!("{}:list-state:v1", app_name)
}

/// Key-value session store
pub struct SessionDb {
    conn: Connection,
}

impl SessionDb {
    pub fn new() -> Result<Self> {
        let dir = Self::get_session_dir()?;
        std::fs::create_dir_all(&dir)?;

        let conn = Connection::open(dir.join("session.db"))?;
        let mut db = SessionDb { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn new_in_memory() -> Result<Self> {
        let mut db = SessionDb {
            conn: Connection::open_in_memory()?,
        };
        db.init_schema()?;
        Ok(db)
    }

    fn get_session_dir() -> Result<PathBuf> {
        if let Some(cache_dir) = dirs::cache_dir() {
            Ok(cache_dir.join("notefinder"))
        } else {
            Ok(crate::utils::get_cache_fallback_path())
        }
    }

    fn init_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS session_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            ) WITHOUT ROWID;
            ",
        )?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM session_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO session_state (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn load_list_state(&self, app_name: &str) -> Result<Option<ListState>> {
        let Some(raw) = self.get(&list_state_key(app_name))? else {
            return Ok(None);
        };
        let state = serde_json::from_str(&raw).context("Corrupt list state in session store")?;
        Ok(Some(state))
    }

    pub fn save_list_state(&self, app_name: &str, state: &ListState) -> Result<()> {
        let raw = serde_json::to_string(state)?;
        self.set(&list_state_key(app_name), &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(list_state_key("notefinder"), "notefinder:list-state:v1");
    }

    #[test]
    fn test_list_state_json_shape() {
        let mut state = ListState {
            path: vec!["1".to_string(), "1-1".to_string()],
            focused_by_folder: HashMap::new(),
        };
        state.focused_by_folder.insert("root".to_string(), 0);
        let json: serde_json::Value = serde_json::to_value(&state).unwrap();
        assert_eq!(json["path"][1], "1-1");
        assert_eq!(json["focusedByFolder"]["root"], 0);
    }

    #[test]
    fn test_save_and_load() {
        let db = SessionDb::new_in_memory().unwrap();
        assert!(db.load_list_state("app").unwrap().is_none());

        let state = ListState {
            path: vec!["a".to_string()],
            focused_by_folder: HashMap::from([("a".to_string(), 3)]),
        };
        db.save_list_state("app", &state).unwrap();
        assert_eq!(db.load_list_state("app").unwrap(), Some(state));
        assert!(db.load_list_state("other").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_state_is_error() {
        let db = SessionDb::new_in_memory().unwrap();
        db.set(&list_state_key("app"), "{not json").unwrap();
        assert!(db.load_list_state("app").is_err());
    }
}
