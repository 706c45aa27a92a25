//! SQLite-backed per-user drive vector + last-read timestamp: opens a
//! fresh connection per call inside `spawn_blocking` rather than holding
//! one across `.await` points.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use gateway_core::DriveVector;
use rusqlite::params;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("blocking task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub fn now_unix() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64
}

pub struct DriveStore {
    db_path: PathBuf,
}

impl DriveStore {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_path = path.as_ref().to_path_buf();
        let conn = rusqlite::Connection::open(&db_path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS drive_state (
                user_id TEXT PRIMARY KEY,
                energy REAL NOT NULL,
                sociability REAL NOT NULL,
                curiosity REAL NOT NULL,
                empathy_reserve REAL NOT NULL,
                novelty_seek REAL NOT NULL,
                last_timestamp INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(Self { db_path })
    }

    /// Loads the stored vector and last-read timestamp, or the baseline
    /// vector stamped at `now` if this user has no row yet.
    pub async fn load(&self, user_id: &str) -> Result<(DriveVector, i64), StoreError> {
        let db_path = self.db_path.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<(DriveVector, i64), StoreError> {
            let conn = rusqlite::Connection::open(&db_path)?;
            let row = conn.query_row(
                "SELECT energy, sociability, curiosity, empathy_reserve, novelty_seek, last_timestamp
                 FROM drive_state WHERE user_id = ?1",
                params![user_id],
                |row| {
                    Ok((
                        DriveVector {
                            energy: row.get(0)?,
                            sociability: row.get(1)?,
                            curiosity: row.get(2)?,
                            empathy_reserve: row.get(3)?,
                            novelty_seek: row.get(4)?,
                        },
                        row.get::<_, i64>(5)?,
                    ))
                },
            );
            match row {
                Ok(found) => Ok(found),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok((DriveVector::baseline(), now_unix())),
                Err(err) => Err(err.into()),
            }
        })
        .await?
    }

    pub async fn save(&self, user_id: &str, vector: DriveVector, timestamp: i64) -> Result<(), StoreError> {
        let db_path = self.db_path.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let conn = rusqlite::Connection::open(&db_path)?;
            conn.execute(
                "INSERT OR REPLACE INTO drive_state
                 (user_id, energy, sociability, curiosity, empathy_reserve, novelty_seek, last_timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![user_id, vector.energy, vector.sociability, vector.curiosity, vector.empathy_reserve, vector.novelty_seek, timestamp],
            )?;
            Ok(())
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (DriveStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("drive.db");
        (DriveStore::new(&db).unwrap(), dir)
    }

    #[tokio::test]
    async fn load_missing_user_returns_baseline() {
        let (store, _dir) = temp_store();
        let (vector, _timestamp) = store.load("u1").await.unwrap();
        assert_eq!(vector, DriveVector::baseline());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let (store, _dir) = temp_store();
        let vector = DriveVector { energy: 0.9, sociability: 0.1, curiosity: 0.5, empathy_reserve: 0.5, novelty_seek: 0.5 };
        store.save("u1", vector, 100).await.unwrap();
        let (loaded, timestamp) = store.load("u1").await.unwrap();
        assert_eq!(loaded, vector);
        assert_eq!(timestamp, 100);
    }
}
