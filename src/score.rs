use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MAX_USERNAME_CHARS;

/// Username → best score, as persisted.
pub type ScoreTable = BTreeMap<String, u32>;

/// Failures surfaced by score store writes.
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("username must be 1 to 20 characters, got {0}")]
    InvalidUsername(usize),
    #[error("failed to write score store: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode score store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Raw persistence behind a [`ScoreStore`]: load everything, save everything.
pub trait ScoreBackend {
    /// Returns the full table; unreadable or missing data reads as empty.
    fn read_all(&self) -> ScoreTable;

    /// Replaces the persisted table with `table`.
    fn write_all(&mut self, table: &ScoreTable) -> Result<(), ScoreStoreError>;
}

/// On-disk layout: one flat JSON object `{ "name": score, ... }`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct ScoreFile {
    users: ScoreTable,
}

/// JSON object `{ "name": score, ... }` stored in one file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreBackend for JsonFileBackend {
    fn read_all(&self) -> ScoreTable {
        load_table_from_path(&self.path)
    }

    fn write_all(&mut self, table: &ScoreTable) -> Result<(), ScoreStoreError> {
        save_table_to_path(&self.path, table)
    }
}

fn load_table_from_path(path: &Path) -> ScoreTable {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no score store at {}", path.display());
            return ScoreTable::new();
        }
        Err(e) => {
            warn!("ignoring unreadable score store {}: {e}", path.display());
            return ScoreTable::new();
        }
    };

    if raw.trim().is_empty() {
        return ScoreTable::new();
    }

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.users)
        .unwrap_or_else(|e| {
            warn!("ignoring malformed score store {}: {e}", path.display());
            ScoreTable::new()
        })
}

fn save_table_to_path(path: &Path, table: &ScoreTable) -> Result<(), ScoreStoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile {
        users: table.clone(),
    };
    let json = serde_json::to_string_pretty(&payload)?;
    fs::write(path, json)?;
    Ok(())
}

/// Volatile backend for tests and sessions that should not touch disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    table: ScoreTable,
    writes: usize,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing table.
    #[must_use]
    pub fn with_table(table: ScoreTable) -> Self {
        Self { table, writes: 0 }
    }

    /// Returns how many times the table has been written.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreBackend for MemoryBackend {
    fn read_all(&self) -> ScoreTable {
        self.table.clone()
    }

    fn write_all(&mut self, table: &ScoreTable) -> Result<(), ScoreStoreError> {
        self.table = table.clone();
        self.writes += 1;
        Ok(())
    }
}

/// Checks the 1..=20 character rule for usernames.
pub fn validate_username(username: &str) -> Result<(), ScoreStoreError> {
    let chars = username.chars().count();
    if chars == 0 || chars > MAX_USERNAME_CHARS {
        return Err(ScoreStoreError::InvalidUsername(chars));
    }
    Ok(())
}

/// Per-user best scores. Every mutation re-reads and re-writes the backend,
/// so the last writer wins.
#[derive(Debug, Clone)]
pub struct ScoreStore<B> {
    backend: B,
}

impl<B: ScoreBackend> ScoreStore<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns every user with their best score.
    #[must_use]
    pub fn read_all(&self) -> ScoreTable {
        self.backend.read_all()
    }

    /// Creates `username` with a best score of zero.
    ///
    /// Returns `Ok(false)` when the name is already taken.
    pub fn create(&mut self, username: &str) -> Result<bool, ScoreStoreError> {
        validate_username(username)?;

        let mut table = self.backend.read_all();
        if table.contains_key(username) {
            return Ok(false);
        }

        table.insert(username.to_owned(), 0);
        self.backend.write_all(&table)?;
        info!("created user {username:?}");
        Ok(true)
    }

    /// Stores `score` as the new best for `username` when it beats the old one.
    ///
    /// Returns `Ok(false)` for unknown users and for scores that do not
    /// exceed the stored best.
    pub fn record_score(&mut self, username: &str, score: u32) -> Result<bool, ScoreStoreError> {
        let mut table = self.backend.read_all();
        let Some(best) = table.get_mut(username) else {
            return Ok(false);
        };

        if score <= *best {
            return Ok(false);
        }

        *best = score;
        self.backend.write_all(&table)?;
        info!("new best score for {username:?}: {score}");
        Ok(true)
    }

    /// Returns the best score for `username`, or 0 when unknown.
    #[must_use]
    pub fn best_score(&self, username: &str) -> u32 {
        self.backend.read_all().get(username).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn has_users(&self) -> bool {
        !self.backend.read_all().is_empty()
    }

    /// Users ordered by best score (highest first), ties by name.
    #[must_use]
    pub fn ranked(&self) -> Vec<(String, u32)> {
        let mut entries: Vec<(String, u32)> = self.backend.read_all().into_iter().collect();
        entries.sort_by(|(a_name, a_score), (b_name, b_score)| {
            b_score.cmp(a_score).then_with(|| a_name.cmp(b_name))
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{
        JsonFileBackend, MemoryBackend, ScoreBackend, ScoreStore, ScoreStoreError, ScoreTable,
        load_table_from_path, save_table_to_path, validate_username,
    };

    #[test]
    fn best_score_only_moves_up() {
        let mut store = ScoreStore::new(MemoryBackend::new());

        assert!(store.create("Alice").expect("create should succeed"));
        assert!(store.record_score("Alice", 50).expect("record should succeed"));
        assert!(!store.record_score("Alice", 30).expect("record should succeed"));
        assert_eq!(store.best_score("Alice"), 50);

        assert!(store.record_score("Alice", 80).expect("record should succeed"));
        assert_eq!(store.best_score("Alice"), 80);
    }

    #[test]
    fn equal_score_is_not_an_improvement() {
        let mut store = ScoreStore::new(MemoryBackend::new());
        store.create("bob").expect("create should succeed");
        store.record_score("bob", 40).expect("record should succeed");
        let writes = store.backend().writes();

        assert!(!store.record_score("bob", 40).expect("record should succeed"));
        assert_eq!(store.backend().writes(), writes);
    }

    #[test]
    fn duplicate_user_is_rejected() {
        let mut store = ScoreStore::new(MemoryBackend::new());

        assert!(store.create("Alice").expect("create should succeed"));
        assert!(!store.create("Alice").expect("create should succeed"));
        assert!(store.create("alice").expect("names are case-sensitive"));
        assert_eq!(store.read_all().len(), 2);
    }

    #[test]
    fn unknown_user_scores_zero_and_cannot_record() {
        let mut store = ScoreStore::new(MemoryBackend::new());

        assert_eq!(store.best_score("ghost"), 0);
        assert!(!store.record_score("ghost", 100).expect("record should succeed"));
        assert!(!store.has_users());
    }

    #[test]
    fn username_length_is_validated() {
        assert!(validate_username("a").is_ok());
        assert!(validate_username(&"x".repeat(20)).is_ok());
        assert!(matches!(
            validate_username(""),
            Err(ScoreStoreError::InvalidUsername(0))
        ));
        assert!(matches!(
            validate_username(&"x".repeat(21)),
            Err(ScoreStoreError::InvalidUsername(21))
        ));

        let mut store = ScoreStore::new(MemoryBackend::new());
        assert!(store.create("").is_err());
        assert!(!store.has_users());
    }

    #[test]
    fn ranked_orders_by_score_then_name() {
        let mut table = ScoreTable::new();
        table.insert("carol".to_owned(), 20);
        table.insert("alice".to_owned(), 50);
        table.insert("bob".to_owned(), 20);
        let store = ScoreStore::new(MemoryBackend::with_table(table));

        assert_eq!(
            store.ranked(),
            vec![
                ("alice".to_owned(), 50),
                ("bob".to_owned(), 20),
                ("carol".to_owned(), 20),
            ]
        );
    }

    #[test]
    fn file_backend_persists_between_instances() {
        let path = unique_test_path("persist");

        let mut store = ScoreStore::new(JsonFileBackend::new(&path));
        store.create("Alice").expect("create should succeed");
        store.record_score("Alice", 70).expect("record should succeed");

        let reopened = ScoreStore::new(JsonFileBackend::new(&path));
        assert_eq!(reopened.best_score("Alice"), 70);

        let raw = fs::read_to_string(&path).expect("store file should exist");
        let parsed: serde_json::Value = serde_json::from_str(&raw).expect("store is JSON");
        assert_eq!(parsed["Alice"], 70);

        cleanup_test_path(&path);
    }

    #[test]
    fn missing_store_reads_as_empty() {
        let path = unique_test_path("missing");
        // Deliberately do not create the file.
        assert!(load_table_from_path(&path).is_empty());
    }

    #[test]
    fn corrupt_store_reads_as_empty() {
        let path = unique_test_path("corrupt");
        for content in ["not-json", "[1, 2, 3]", "{\"a\": -4}", ""] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("test parent directory should be creatable");
            }
            fs::write(&path, content).expect("test file write should succeed");

            assert!(
                JsonFileBackend::new(&path).read_all().is_empty(),
                "{content:?} should read as empty"
            );
        }

        cleanup_test_path(&path);
    }

    #[test]
    fn corrupt_store_is_replaced_on_next_write() {
        let path = unique_test_path("overwrite");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "{oops").expect("test file write should succeed");

        let mut store = ScoreStore::new(JsonFileBackend::new(&path));
        assert!(store.create("dana").expect("create should succeed"));
        assert_eq!(store.read_all().len(), 1);

        cleanup_test_path(&path);
    }

    #[test]
    fn write_into_missing_directory_creates_it() {
        let path = unique_test_path("nested");
        let mut table = ScoreTable::new();
        table.insert("eve".to_owned(), 5);

        save_table_to_path(&path, &table).expect("save should succeed");

        assert_eq!(load_table_from_path(&path), table);
        cleanup_test_path(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-score-tests")
            .join(format!("{label}-{nanos}"))
            .join("users.json")
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
