//! Per-player progress, kept in a local key-value store.
//!
//! One entry per username holds `{ generalScore, progress: { memory, genius,
//! ligar } }`. Reads that fail fall back to a fresh record and writes that
//! fail are logged; losing persistence never interrupts a session.

use bevy::prelude::*;
use bevy::utils::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::round::GameKind;

const KEY_PREFIX: &str = "morfologic:";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored record is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub memory: u32,
    pub genius: u32,
    pub ligar: u32,
}

impl Progress {
    pub const fn phase_reached(&self, game: GameKind) -> u32 {
        match game {
            GameKind::Memory => self.memory,
            GameKind::Genius => self.genius,
            GameKind::Ligar => self.ligar,
        }
    }

    /// Raises the phase reached for `game`; never lowers it.
    pub fn record_phase(&mut self, game: GameKind, phase: u32) {
        let slot = match game {
            GameKind::Memory => &mut self.memory,
            GameKind::Genius => &mut self.genius,
            GameKind::Ligar => &mut self.ligar,
        };
        *slot = (*slot).max(phase);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerRecord {
    pub general_score: u32,
    pub progress: Progress,
}

/// Minimal string key-value storage, the shape of browser `localStorage`.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{KeyValueStore, StoreError};

    /// `window.localStorage`.
    #[derive(Debug, Default)]
    pub struct BrowserStore;

    impl BrowserStore {
        fn storage() -> Result<web_sys::Storage, StoreError> {
            let window = web_sys::window()
                .ok_or_else(|| StoreError::Unavailable("no global window".into()))?;
            window
                .local_storage()
                .map_err(|err| StoreError::Unavailable(format!("{err:?}")))?
                .ok_or_else(|| StoreError::Unavailable("localStorage disabled".into()))
        }
    }

    impl KeyValueStore for BrowserStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Self::storage()?
                .get_item(key)
                .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            tracing::debug!(key, "writing player record to localStorage");
            Self::storage()?
                .set_item(key, value)
                .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::path::{Path, PathBuf};

    use directories::ProjectDirs;

    use super::{KeyValueStore, StoreError};

    /// One JSON file per key inside a directory.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        pub fn new() -> Self {
            let dir = ProjectDirs::from("", "", "morfologic").map_or_else(
                || PathBuf::from("morfologic_data"),
                |dirs| dirs.data_local_dir().to_path_buf(),
            );
            Self { dir }
        }

        pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
            Self {
                dir: dir.as_ref().to_path_buf(),
            }
        }

        fn path_for(&self, key: &str) -> PathBuf {
            let file_name: String = key
                .chars()
                .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
                .collect();
            self.dir.join(format!("{file_name}.json"))
        }
    }

    impl Default for FileStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            match fs::read_to_string(self.path_for(key)) {
                Ok(contents) => Ok(Some(contents)),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(err) => Err(err.into()),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            fs::create_dir_all(&self.dir)?;
            let path = self.path_for(key);
            tracing::debug!(path = %path.display(), "writing player record");
            fs::write(path, value)?;
            Ok(())
        }
    }
}

/// The store the app reads and writes player records through.
#[derive(Resource)]
pub struct ProgressBook {
    store: Box<dyn KeyValueStore>,
}

impl Default for ProgressBook {
    fn default() -> Self {
        #[cfg(target_arch = "wasm32")]
        let store = BrowserStore;
        #[cfg(not(target_arch = "wasm32"))]
        let store = FileStore::new();
        Self::new(store)
    }
}

impl ProgressBook {
    pub fn new(store: impl KeyValueStore) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    fn key(username: &str) -> String {
        format!("{KEY_PREFIX}{}", username.trim().to_lowercase())
    }

    pub fn try_load(&self, username: &str) -> Result<PlayerRecord, StoreError> {
        match self.store.get(&Self::key(username))? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(PlayerRecord::default()),
        }
    }

    /// Reads a player's record, starting from zero when it is missing or
    /// unreadable.
    pub fn load(&self, username: &str) -> PlayerRecord {
        self.try_load(username).unwrap_or_else(|err| {
            warn!("Could not read progress for {username}, starting fresh: {err}");
            PlayerRecord::default()
        })
    }

    pub fn try_save(&mut self, username: &str, record: &PlayerRecord) -> Result<(), StoreError> {
        let raw = serde_json::to_string(record)?;
        self.store.set(&Self::key(username), &raw)
    }

    /// Writes a player's record. Failures are logged and otherwise ignored.
    pub fn save(&mut self, username: &str, record: &PlayerRecord) {
        if let Err(err) = self.try_save(username, record) {
            warn!("Could not save progress for {username}: {err}");
        }
    }
}
