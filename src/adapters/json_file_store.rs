//! One pretty-printed JSON file per board.
//!
//! Records live at `<root>/<KEY>.json`. Files are written whole on every
//! revision and never locked, so two processes sharing a directory race.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    Result,
    error::Error,
    ports::{StatsRecord, StatsStore},
    types::BoardKey,
};

/// Directory-backed [`StatsStore`].
///
/// # Examples
///
/// ```no_run
/// use selfplay::adapters::JsonFileStore;
/// use selfplay::engine::StateRegistry;
///
/// let mut registry = StateRegistry::new(JsonFileStore::new(".selfplay/states"));
/// let root = registry.initial()?;
/// registry.revise(root, 0.5)?;
/// # Ok::<(), selfplay::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the record for `key`.
    pub fn path_for(&self, key: &BoardKey) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn remove(&self, path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(Error::Io {
                operation: format!("remove {path:?}"),
                source,
            }),
        }
    }
}

impl StatsStore for JsonFileStore {
    fn load(&self, key: &BoardKey) -> Result<Option<StatsRecord>> {
        let path = self.path_for(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                log::warn!("deleting unreadable statistics file {path:?}: {e}");
                self.remove(&path)?;
                return Ok(None);
            }
            Err(source) => {
                return Err(Error::Io {
                    operation: format!("read {path:?}"),
                    source,
                });
            }
        };

        match serde_json::from_str(&text) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                log::warn!("deleting corrupt statistics file {path:?}: {e}");
                self.remove(&path)?;
                Ok(None)
            }
        }
    }

    fn save(&self, key: &BoardKey, record: &StatsRecord) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|source| Error::Io {
            operation: format!("create directory {:?}", self.root),
            source,
        })?;

        let path = self.path_for(key);
        let text = serde_json::to_string_pretty(record)?;
        fs::write(&path, text).map_err(|source| Error::Io {
            operation: format!("write {path:?}"),
            source,
        })
    }

    fn discard(&self, key: &BoardKey) -> Result<()> {
        self.remove(&self.path_for(key)).map(|_| ())
    }

    fn keys(&self) -> Result<Vec<BoardKey>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(Error::Io {
                    operation: format!("list {:?}", self.root),
                    source,
                });
            }
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            // Other JSON files may share the directory. Only canonical stems
            // count, since `path_for` could not reach anything else.
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
                && let Ok(key) = BoardKey::parse(stem)
                && key.as_str() == stem
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for key in self.keys()? {
            if self.remove(&self.path_for(&key))? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{engine::Position, tictactoe::Board};

    fn record_for(board: Board) -> StatsRecord {
        Position::new(board).to_record()
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFileStore::new(temp_dir.path().join("states"));
        let board = Board::from_key("X---O----").unwrap();
        let key = board.key();

        assert!(store.load(&key).unwrap().is_none());
        store.save(&key, &record_for(board)).unwrap();
        assert!(temp_dir.path().join("states/X---O----.json").exists());

        let loaded = store.load(&key).unwrap().unwrap();
        assert_eq!(loaded, record_for(board));
    }

    #[test]
    fn test_file_is_readable_json() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFileStore::new(temp_dir.path());
        let key = Board::new().key();
        store.save(&key, &record_for(Board::new())).unwrap();

        let text = fs::read_to_string(store.path_for(&key)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["revision_count"], 0);
        assert_eq!(json["value"], serde_json::json!([0.0, 0.0]));
        assert_eq!(json["actions"].as_array().unwrap().len(), 9);
        assert_eq!(json["next_to_play"], "X");
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_corrupt_file_is_deleted() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFileStore::new(temp_dir.path());
        let key = Board::new().key();
        let path = store.path_for(&key);
        fs::write(&path, "{ not json").unwrap();

        assert!(store.load(&key).unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_keys_discard_and_clear() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFileStore::new(temp_dir.path());
        assert!(store.keys().unwrap().is_empty());

        for key in ["X--------", "---------", "XO-------"] {
            let board = Board::from_key(key).unwrap();
            store.save(&board.key(), &record_for(board)).unwrap();
        }
        fs::write(temp_dir.path().join("config.json"), "{}").unwrap();

        let keys: Vec<String> = store
            .keys()
            .unwrap()
            .into_iter()
            .map(BoardKey::into_string)
            .collect();
        assert_eq!(keys, vec!["---------", "X--------", "XO-------"]);

        store.discard(&BoardKey::parse("X--------").unwrap()).unwrap();
        store.discard(&BoardKey::parse("X--------").unwrap()).unwrap();
        assert_eq!(store.keys().unwrap().len(), 2);

        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.keys().unwrap().is_empty());
        assert!(temp_dir.path().join("config.json").exists());
    }

    #[test]
    fn test_non_canonical_stems_are_not_keys() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFileStore::new(temp_dir.path());
        let board = Board::from_key("X--------").unwrap();
        store.save(&board.key(), &record_for(board)).unwrap();
        fs::write(temp_dir.path().join("x--------.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("O---X---0.json"), "{}").unwrap();

        let keys = store.keys().unwrap();
        assert_eq!(keys, vec![board.key()]);

        assert_eq!(store.clear().unwrap(), 1);
        assert!(temp_dir.path().join("x--------.json").exists());
        assert!(temp_dir.path().join("O---X---0.json").exists());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let store = JsonFileStore::new("/nonexistent_selfplay_12345/states");
        assert!(store.keys().unwrap().is_empty());
        assert!(store.load(&Board::new().key()).unwrap().is_none());
    }
}
