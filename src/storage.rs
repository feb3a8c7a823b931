//! Key/value persistence port for the planner's state slices.
//!
//! Each slice is one JSON blob under a fixed key. [`FileStore`] keeps a
//! `<key>.json` file per key; [`MemoryStore`] is used by tests.

use crate::errors::{ImportError, StoreError};
use axum::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use tokio::{fs, sync::Mutex};
use tracing::{error, warn};

pub const DIET_KEY: &str = "menuPlannerState_v2";
pub const SUPPLEMENTS_KEY: &str = "supplements_state";
pub const SPLITS_KEY: &str = "savedSplits";
pub const TEMPLATES_KEY: &str = "timingTemplates";

/// Shape fix-up applied to a slice after it is read from outside the process.
pub trait Normalize {
    fn normalize(&mut self) {}
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|source| StoreError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value)
            .await
            .map_err(|source| StoreError::Io {
                key: key.to_string(),
                source,
            })
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// Overlays the top-level keys of a JSON object onto `base`.
///
/// The merged document has to deserialize back into `T`; on any failure `base`
/// is left untouched and the caller keeps its current value.
pub fn merge_top_level<T>(base: &T, patch: &[u8]) -> Result<T, ImportError>
where
    T: Serialize + DeserializeOwned + Normalize,
{
    let patch: serde_json::Value = serde_json::from_slice(patch).map_err(ImportError::Syntax)?;
    let serde_json::Value::Object(patch) = patch else {
        return Err(ImportError::NotAnObject);
    };

    let mut merged = serde_json::to_value(base).map_err(ImportError::Schema)?;
    match merged.as_object_mut() {
        Some(fields) => fields.extend(patch),
        None => return Err(ImportError::NotAnObject),
    }

    let mut data: T = serde_json::from_value(merged).map_err(ImportError::Schema)?;
    data.normalize();
    Ok(data)
}

/// Loads a slice, merged over its default. Falls back to the default when the
/// blob is missing or unreadable.
pub async fn load_slice<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: Serialize + DeserializeOwned + Default + Normalize,
{
    let fallback = T::default();
    match store.get(key).await {
        Ok(Some(bytes)) => match merge_top_level(&fallback, &bytes) {
            Ok(data) => data,
            Err(err) => {
                error!(key, "failed to parse stored state: {err}");
                fallback
            }
        },
        Ok(None) => fallback,
        Err(err) => {
            error!(key, "failed to read stored state: {err}");
            fallback
        }
    }
}

/// Loads a slice that is stored whole rather than as an object (lists, maps).
pub async fn load_value<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key).await {
        Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
            warn!(key, "discarding unreadable stored value: {err}");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            error!(key, "failed to read stored value: {err}");
            T::default()
        }
    }
}

pub async fn persist_slice<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    data: &T,
) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(data).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.put(key, payload).await
}
