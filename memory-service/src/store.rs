//! SQLite-backed traits + episodes store: opens a fresh connection per
//! call inside `spawn_blocking` rather than holding one across `.await`
//! points.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;
use thiserror::Error;

use gateway_core::{Episode, Trait};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("blocking task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("serialize tags: {0}")]
    Json(#[from] serde_json::Error),
}

fn now_unix() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64
}

pub struct MemoryStore {
    db_path: PathBuf,
}

impl MemoryStore {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_path = path.as_ref().to_path_buf();
        let conn = rusqlite::Connection::open(&db_path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS traits (
                user_id TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                confidence REAL NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (user_id, key)
            )",
            [],
        )?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS episodes (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                content TEXT NOT NULL,
                summary TEXT NOT NULL,
                confidence REAL NOT NULL,
                tags TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;
        conn.execute("CREATE INDEX IF NOT EXISTS idx_episodes_user ON episodes(user_id, created_at)", [])?;
        Ok(Self { db_path })
    }

    /// Inserts or updates one trait (spec §3: persisted keyed by
    /// `(user_id, key)`; `created_at` is preserved across updates).
    pub async fn upsert_trait(&self, user_id: &str, key: &str, value: &str, confidence: f64) -> Result<(), StoreError> {
        let db_path = self.db_path.clone();
        let (user_id, key, value) = (user_id.to_string(), key.to_string(), value.to_string());
        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let conn = rusqlite::Connection::open(&db_path)?;
            let now = now_unix();
            let existing_created: Option<i64> = conn
                .query_row(
                    "SELECT created_at FROM traits WHERE user_id = ?1 AND key = ?2",
                    params![user_id, key],
                    |row| row.get(0),
                )
                .ok();
            let created_at = existing_created.unwrap_or(now);
            conn.execute(
                "INSERT OR REPLACE INTO traits (user_id, key, value, confidence, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![user_id, key, value, confidence, created_at, now],
            )?;
            Ok(())
        })
        .await?
    }

    pub async fn traits_for(&self, user_id: &str) -> Result<Vec<Trait>, StoreError> {
        let db_path = self.db_path.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<Vec<Trait>, StoreError> {
            let conn = rusqlite::Connection::open(&db_path)?;
            let mut stmt = conn.prepare(
                "SELECT user_id, key, value, confidence, created_at, updated_at FROM traits WHERE user_id = ?1 ORDER BY updated_at DESC",
            )?;
            let rows = stmt.query_map(params![user_id], |row| {
                Ok(Trait {
                    user_id: row.get(0)?,
                    key: row.get(1)?,
                    value: row.get(2)?,
                    confidence: row.get(3)?,
                    created_at: row.get(4)?,
                    updated_at: row.get(5)?,
                })
            })?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
        .await?
    }

    /// Inserts one episode (spec §3: only called once the caller has
    /// confirmed `content.len() >= MIN_EPISODE_CONTENT_LEN` and
    /// `confidence >= MIN_PERSIST_CONFIDENCE`).
    pub async fn insert_episode(&self, episode: Episode) -> Result<(), StoreError> {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let conn = rusqlite::Connection::open(&db_path)?;
            let tags = serde_json::to_string(&episode.tags)?;
            conn.execute(
                "INSERT INTO episodes (id, user_id, content, summary, confidence, tags, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![episode.id, episode.user_id, episode.content, episode.summary, episode.confidence, tags, episode.created_at],
            )?;
            Ok(())
        })
        .await?
    }

    /// Returns the `k` most recent episodes for `user_id`, optionally
    /// filtered to those tagged with `intent` (spec §4.7 retrieval: recency
    /// + simple tag match, no vector index).
    pub async fn recent_episodes(&self, user_id: &str, intent: &str, k: u32) -> Result<Vec<Episode>, StoreError> {
        let db_path = self.db_path.clone();
        let (user_id, intent) = (user_id.to_string(), intent.to_lowercase());
        tokio::task::spawn_blocking(move || -> Result<Vec<Episode>, StoreError> {
            let conn = rusqlite::Connection::open(&db_path)?;
            let mut stmt = conn.prepare(
                "SELECT id, user_id, content, summary, confidence, tags, created_at
                 FROM episodes WHERE user_id = ?1 ORDER BY created_at DESC LIMIT 200",
            )?;
            let rows = stmt.query_map(params![user_id], |row| {
                let tags_json: String = row.get(5)?;
                let tags: Vec<String> = serde_json::from_str(&tags_json).unwrap_or_default();
                Ok(Episode {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    content: row.get(2)?,
                    summary: row.get(3)?,
                    confidence: row.get(4)?,
                    tags,
                    created_at: row.get(6)?,
                })
            })?;
            let all: Vec<Episode> = rows.collect::<Result<Vec<_>, _>>()?;

            let matching: Vec<Episode> =
                all.iter().filter(|e| e.tags.iter().any(|t| t.to_lowercase() == intent)).cloned().collect();
            let mut picked = if matching.is_empty() { all } else { matching };
            picked.truncate(k as usize);
            Ok(picked)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (MemoryStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("memory.db");
        (MemoryStore::new(&db).unwrap(), dir)
    }

    #[tokio::test]
    async fn upsert_trait_preserves_created_at_on_update() {
        let (store, _dir) = temp_store();
        store.upsert_trait("u1", "name", "Alice", 0.9).await.unwrap();
        let first = store.traits_for("u1").await.unwrap();
        store.upsert_trait("u1", "name", "Alicia", 0.9).await.unwrap();
        let second = store.traits_for("u1").await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].value, "Alicia");
        assert_eq!(first[0].created_at, second[0].created_at);
    }

    #[tokio::test]
    async fn recent_episodes_filters_by_tag_then_falls_back() {
        let (store, _dir) = temp_store();
        store
            .insert_episode(Episode {
                id: "e1".into(),
                user_id: "u1".into(),
                content: "talked about TECH stuff".into(),
                summary: "s".into(),
                confidence: 0.8,
                tags: vec!["TECH".into()],
                created_at: 1,
            })
            .await
            .unwrap();
        store
            .insert_episode(Episode {
                id: "e2".into(),
                user_id: "u1".into(),
                content: "talked about something else".into(),
                summary: "s2".into(),
                confidence: 0.8,
                tags: vec!["OPEN_ENDED".into()],
                created_at: 2,
            })
            .await
            .unwrap();

        let tech = store.recent_episodes("u1", "TECH", 5).await.unwrap();
        assert_eq!(tech.len(), 1);
        assert_eq!(tech[0].id, "e1");

        let none_match = store.recent_episodes("u1", "LEGAL", 5).await.unwrap();
        assert_eq!(none_match.len(), 2);
    }
}
