//! Highscore Store
//!
//! A flat file of completed-round records, loaded wholesale, mutated in
//! memory, and rewritten under an exclusive lock. A missing file means "no
//! highscores yet", never an error. Readers outside the lock may observe a
//! stale or momentarily-empty file.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::warn;

use crate::highscore::record::HighscoreRecord;

/// Ordered highscore list, best (fewest attempts) first.
///
/// Sorting is stable, so records with equal attempt counts keep their
/// insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighscoreList {
    records: Vec<HighscoreRecord>,
}

/// Display-ready view of one list entry.
#[derive(Clone, Debug, Serialize)]
pub struct HighscoreRow {
    /// 1-based position in the list.
    pub rank: usize,
    /// Guesses taken.
    pub attempts: u32,
    /// The number that was found.
    pub number: u32,
    /// Completion date, `dd.mm.yyyy`.
    pub date: String,
    /// Completion time, `hh:mm:ss`.
    pub time: String,
}

impl HighscoreList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from unordered records, sorting by attempts.
    pub fn from_records(mut records: Vec<HighscoreRecord>) -> Self {
        records.sort_by_key(|r| r.attempts);
        Self { records }
    }

    /// Push a record and re-sort ascending by attempts.
    pub fn append(&mut self, record: HighscoreRecord) {
        self.records.push(record);
        self.records.sort_by_key(|r| r.attempts);
    }

    /// Records in sorted order.
    pub fn records(&self) -> &[HighscoreRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no round has been completed yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Display-ready rows for the page and the JSON view.
    /// Pure formatting; no state mutation.
    pub fn render(&self) -> Vec<HighscoreRow> {
        self.records
            .iter()
            .enumerate()
            .map(|(idx, r)| HighscoreRow {
                rank: idx + 1,
                attempts: r.attempts,
                number: r.secret,
                date: r.date.clone(),
                time: r.time.clone(),
            })
            .collect()
    }

    /// Full file contents: one line per record, trailing newline each.
    fn to_file_contents(&self) -> String {
        let mut contents = String::new();
        for record in &self.records {
            contents.push_str(&record.to_line());
            contents.push('\n');
        }
        contents
    }
}

/// Store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Writing the highscore file failed.
    #[error("highscore write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The persisted highscore file plus the lock serializing its writers.
///
/// The lock is held across the whole truncate-and-rewrite, so two racing
/// completions cannot corrupt the file; release is guaranteed when the
/// guard leaves scope.
pub struct HighscoreStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl HighscoreStore {
    /// Create a store backed by `path`. The file is created on first persist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted list.
    ///
    /// A missing file yields an empty list. Malformed lines are skipped
    /// with a warning; an unreadable file degrades to "no highscores".
    pub async fn load(&self) -> HighscoreList {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return HighscoreList::new();
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "highscore load failed, starting empty");
                return HighscoreList::new();
            }
        };

        let mut records = Vec::new();
        for (number, line) in contents.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            match HighscoreRecord::parse_line(line) {
                Some(record) => records.push(record),
                None => {
                    warn!(path = %self.path.display(), line = number + 1, "skipping malformed highscore line");
                }
            }
        }

        HighscoreList::from_records(records)
    }

    /// Rewrite the file from the list, under the writer lock.
    pub async fn persist(&self, list: &HighscoreList) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_locked(list).await
    }

    /// Run the full win cycle in one lock scope: load, append, persist.
    ///
    /// Returns the refreshed list for the session. A failed write is
    /// surfaced as a warning, not an error; the refreshed list is still
    /// returned so the page shows the new entry.
    pub async fn record_win(&self, record: HighscoreRecord) -> HighscoreList {
        let _guard = self.write_lock.lock().await;

        let mut list = self.load().await;
        list.append(record);

        if let Err(err) = self.write_locked(&list).await {
            warn!(path = %self.path.display(), %err, "highscore persist failed, entry kept in memory");
        }

        list
    }

    /// Truncate and rewrite. Caller must hold `write_lock`.
    async fn write_locked(&self, list: &HighscoreList) -> Result<(), StoreError> {
        tokio::fs::write(&self.path, list.to_file_contents()).await?;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(attempts: u32, secret: u32) -> HighscoreRecord {
        HighscoreRecord {
            attempts,
            secret,
            date: "07.08.2026".to_string(),
            time: "14:30:00".to_string(),
        }
    }

    fn temp_store() -> (tempfile::TempDir, HighscoreStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = HighscoreStore::new(dir.path().join("highscores.txt"));
        (dir, store)
    }

    #[test]
    fn test_append_keeps_list_sorted() {
        let mut list = HighscoreList::new();
        list.append(record(7, 10));
        list.append(record(3, 20));
        list.append(record(5, 30));

        let attempts: Vec<u32> = list.records().iter().map(|r| r.attempts).collect();
        assert_eq!(attempts, vec![3, 5, 7]);
    }

    #[test]
    fn test_append_ties_keep_insertion_order() {
        let mut list = HighscoreList::new();
        list.append(record(5, 11));
        list.append(record(5, 22));
        list.append(record(3, 33));

        let secrets: Vec<u32> = list.records().iter().map(|r| r.secret).collect();
        assert_eq!(secrets, vec![33, 11, 22]);
    }

    #[test]
    fn test_render_rows() {
        let mut list = HighscoreList::new();
        list.append(record(5, 11));
        list.append(record(3, 42));

        let rows = list.render();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].attempts, 3);
        assert_eq!(rows[0].number, 42);
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].date, "07.08.2026");
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let (_dir, store) = temp_store();
        let list = store.load().await;
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_persist_load_roundtrip() {
        let (_dir, store) = temp_store();

        let mut list = HighscoreList::new();
        list.append(record(7, 10));
        list.append(record(3, 42));
        list.append(record(5, 77));

        store.persist(&list).await.unwrap();
        let loaded = store.load().await;

        assert_eq!(loaded, list);
    }

    #[tokio::test]
    async fn test_persisted_file_format() {
        let (_dir, store) = temp_store();

        let mut list = HighscoreList::new();
        list.append(record(3, 42));
        store.persist(&list).await.unwrap();

        let contents = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(contents, "3|42|07.08.2026|14:30:00\n");
    }

    #[tokio::test]
    async fn test_load_skips_malformed_lines() {
        let (_dir, store) = temp_store();

        tokio::fs::write(
            store.path(),
            "3|42|07.08.2026|14:30:00\nnot a record\n5|10|06.08.2026|09:00:00\n",
        )
        .await
        .unwrap();

        let list = store.load().await;
        assert_eq!(list.len(), 2);
        assert_eq!(list.records()[0].attempts, 3);
        assert_eq!(list.records()[1].attempts, 5);
    }

    #[tokio::test]
    async fn test_record_win_appends_and_persists() {
        let (_dir, store) = temp_store();

        let mut list = HighscoreList::new();
        list.append(record(5, 10));
        store.persist(&list).await.unwrap();

        let refreshed = store.record_win(record(3, 42)).await;

        // Refreshed list is sorted with the new entry first
        assert_eq!(refreshed.len(), 2);
        assert_eq!(refreshed.records()[0].attempts, 3);

        // And the file agrees
        let reloaded = store.load().await;
        assert_eq!(reloaded, refreshed);
    }

    #[tokio::test]
    async fn test_record_win_creates_file() {
        let (_dir, store) = temp_store();

        let refreshed = store.record_win(record(4, 50)).await;
        assert_eq!(refreshed.len(), 1);

        let reloaded = store.load().await;
        assert_eq!(reloaded, refreshed);
    }

    #[tokio::test]
    async fn test_concurrent_wins_all_recorded() {
        let (_dir, store) = temp_store();
        let store = std::sync::Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..8u32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.record_win(record(i + 1, 10 + i)).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let list = store.load().await;
        assert_eq!(list.len(), 8);
        let attempts: Vec<u32> = list.records().iter().map(|r| r.attempts).collect();
        assert_eq!(attempts, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
