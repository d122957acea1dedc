use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::watchlist::Watchlist;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("watchlist file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("watchlist file is corrupt: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// A session without a stored watchlist gets an empty one.
    async fn load_watchlist(&self, session_id: &str) -> Result<Watchlist, StorageError>;
    async fn save_watchlist(
        &self,
        session_id: &str,
        watchlist: &Watchlist,
    ) -> Result<(), StorageError>;
}

#[derive(Default)]
pub struct MemoryStorage {
    watchlists: RwLock<HashMap<String, Watchlist>>,
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load_watchlist(&self, session_id: &str) -> Result<Watchlist, StorageError> {
        Ok(self
            .watchlists
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_watchlist(
        &self,
        session_id: &str,
        watchlist: &Watchlist,
    ) -> Result<(), StorageError> {
        self.watchlists
            .write()
            .await
            .insert(session_id.to_string(), watchlist.clone());
        Ok(())
    }
}

/// One JSON file per session under `data_dir`.
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn path(&self, session_id: &str) -> PathBuf {
        self.data_dir.join(format!("{session_id}.json"))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load_watchlist(&self, session_id: &str) -> Result<Watchlist, StorageError> {
        match tokio::fs::read(self.path(session_id)).await {
            Ok(payload) => Ok(serde_json::from_slice(&payload)?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Watchlist::default()),
            Err(error) => Err(error.into()),
        }
    }

    async fn save_watchlist(
        &self,
        session_id: &str,
        watchlist: &Watchlist,
    ) -> Result<(), StorageError> {
        let path = self.path(session_id);
        if watchlist.is_empty() {
            return match tokio::fs::remove_file(path).await {
                Err(error) if error.kind() != std::io::ErrorKind::NotFound => Err(error.into()),
                _ => Ok(()),
            };
        }
        let payload = serde_json::to_vec_pretty(watchlist)?;
        tokio::fs::write(path, payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Watchlist {
        let mut watchlist = Watchlist::default();
        watchlist.add("library.book", 1, "Dune");
        watchlist.add("library.author", 2, "Jane Austen");
        watchlist
    }

    #[tokio::test]
    async fn memory_storage_keeps_sessions_apart() {
        let storage = MemoryStorage::default();
        storage.save_watchlist("a", &sample()).await.unwrap();
        assert_eq!(storage.load_watchlist("a").await.unwrap(), sample());
        assert!(storage.load_watchlist("b").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn file_storage_round_trips_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf());
        assert!(storage.load_watchlist("s1").await.unwrap().is_empty());

        storage.save_watchlist("s1", &sample()).await.unwrap();
        assert!(dir.path().join("s1.json").exists());
        assert_eq!(storage.load_watchlist("s1").await.unwrap(), sample());

        storage
            .save_watchlist("s1", &Watchlist::default())
            .await
            .unwrap();
        assert!(!dir.path().join("s1.json").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("bad.json"), b"[1, 2")
            .await
            .unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf());
        assert!(matches!(
            storage.load_watchlist("bad").await,
            Err(StorageError::Decode(_))
        ));
    }
}
