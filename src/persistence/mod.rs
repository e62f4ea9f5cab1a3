//! Best-score persistence
//!
//! A tiny key-value contract: one key, one decimal integer value.
//! - `MemoryStore`: in-process (tests, headless runs without a directory)
//! - `FileStore`: native, one file per key inside a directory
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value for {key} is not an integer: {value:?}")]
    Parse { key: String, value: String },

    #[error("Storage unavailable")]
    Unavailable,
}

/// Key-value store for small integer values
pub trait ScoreStore {
    /// Read a value; `Ok(None)` when the key was never written
    fn load(&self, key: &str) -> Result<Option<u64>, StoreError>;

    fn save(&mut self, key: &str, value: u64) -> Result<(), StoreError>;
}

pub(crate) fn parse_value(key: &str, raw: &str) -> Result<u64, StoreError> {
    raw.trim().parse().map_err(|_| StoreError::Parse {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: u64) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn save(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::PathBuf;

    use super::{ScoreStore, StoreError, parse_value};

    /// Directory-backed store: `<dir>/<key>` holds the decimal value
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        fn path(&self, key: &str) -> PathBuf {
            self.dir.join(key)
        }
    }

    impl ScoreStore for FileStore {
        fn load(&self, key: &str) -> Result<Option<u64>, StoreError> {
            match fs::read_to_string(self.path(key)) {
                Ok(raw) => parse_value(key, &raw).map(Some),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn save(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
            fs::create_dir_all(&self.dir)?;
            // Write-then-rename so a crash never leaves a half-written value
            let tmp = self.dir.join(format!("{key}.tmp"));
            fs::write(&tmp, value.to_string())?;
            fs::rename(&tmp, self.path(key))?;
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{ScoreStore, StoreError, parse_value};

    /// Browser LocalStorage
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorageStore;

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }

    impl ScoreStore for LocalStorageStore {
        fn load(&self, key: &str) -> Result<Option<u64>, StoreError> {
            match storage()?.get_item(key) {
                Ok(Some(raw)) => parse_value(key, &raw).map(Some),
                Ok(None) => Ok(None),
                Err(_) => Err(StoreError::Unavailable),
            }
        }

        fn save(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
            storage()?
                .set_item(key, &value.to_string())
                .map_err(|_| StoreError::Unavailable)
        }
    }
}
