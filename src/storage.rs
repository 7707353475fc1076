//! Persistent key/value store backing the player state
//!
//! Everything the player persists (account, session flags, liked songs,
//! recently played, playlists, volume) lives in one JSON snapshot file.
//! The full snapshot is rewritten after every mutation; there are no
//! partial or incremental updates.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

pub const DEFAULT_STORE_FILE: &str = ".data/mymusic.json";

/// Well-known store keys.
pub mod keys {
    pub const USER_EMAIL: &str = "userEmail";
    pub const USERNAME: &str = "user";
    pub const PASSWORD_HASH: &str = "pass";
    pub const ACCOUNT_CREATED: &str = "accountCreated";
    pub const LOGGED_IN: &str = "loggedIn";
    pub const LAST_LOGIN: &str = "lastLogin";
    pub const REMEMBER_ME: &str = "rememberMe";
    pub const LOGIN_ATTEMPTS: &str = "loginAttempts";
    pub const LIKED: &str = "liked";
    pub const RECENTLY_PLAYED: &str = "recentlyPlayed";
    pub const PLAYLISTS: &str = "playlists";
    pub const VOLUME: &str = "volume";
}

/// JSON key/value snapshot store.
#[derive(Clone)]
pub struct Store {
    path: PathBuf,
    values: Arc<RwLock<HashMap<String, Value>>>,
}

impl Store {
    /// Open the store at `path`, loading the existing snapshot if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            values: Arc::new(RwLock::new(values)),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let values = self.values.read().await;
        values
            .get(key)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.values.read().await.contains_key(key)
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        {
            let mut values = self.values.write().await;
            values.insert(key.to_string(), serde_json::to_value(value)?);
        }
        self.save_to_disk().await
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        {
            let mut values = self.values.write().await;
            values.remove(key);
        }
        self.save_to_disk().await
    }

    async fn save_to_disk(&self) -> Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            fs::create_dir_all(dir)?;
        }

        let values = self.values.read().await;
        let content = serde_json::to_string_pretty(&*values)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("state.json")).unwrap();
        assert!(!store.contains(keys::LIKED).await);
        assert_eq!(store.get::<Vec<usize>>(keys::LIKED).await, None);
    }

    #[tokio::test]
    async fn values_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = Store::open(&path).unwrap();
        store.set(keys::LIKED, &vec![0usize, 3, 5]).await.unwrap();
        store.set(keys::VOLUME, &80u8).await.unwrap();
        store.set(keys::LOGGED_IN, &true).await.unwrap();

        // Re-open from the snapshot written above
        let reopened = Store::open(&path).unwrap();
        assert_eq!(
            reopened.get::<Vec<usize>>(keys::LIKED).await,
            Some(vec![0, 3, 5])
        );
        assert_eq!(reopened.get::<u8>(keys::VOLUME).await, Some(80));
        assert_eq!(reopened.get::<bool>(keys::LOGGED_IN).await, Some(true));
    }

    #[tokio::test]
    async fn remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = Store::open(&path).unwrap();
        store.set(keys::REMEMBER_ME, &true).await.unwrap();
        store.remove(keys::REMEMBER_ME).await.unwrap();

        let reopened = Store::open(&path).unwrap();
        assert!(!reopened.contains(keys::REMEMBER_ME).await);
    }
}
