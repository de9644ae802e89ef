//! Favorites stores for desktop hosts

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    favorites::{FavoriteRecord, FavoritesStore},
};
use core_async::sync::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Non-persistent store, handy for tests and previews
#[derive(Default)]
pub struct MemoryFavoritesStore {
    records: RwLock<BTreeMap<u32, FavoriteRecord>>,
}

impl MemoryFavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoritesStore for MemoryFavoritesStore {
    async fn is_favorite(&self, id: u32) -> Result<bool> {
        Ok(self.records.read().await.contains_key(&id))
    }

    async fn add(&self, record: FavoriteRecord) -> Result<()> {
        self.records.write().await.insert(record.id, record);
        Ok(())
    }

    async fn remove(&self, id: u32) -> Result<()> {
        self.records.write().await.remove(&id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<FavoriteRecord>> {
        Ok(self.records.read().await.values().cloned().collect())
    }
}

/// Favorites persisted as a JSON array in a single file
///
/// The file is read lazily on first access and rewritten after every
/// change (write to a sibling temp file, then rename). A missing file is an
/// empty store.
pub struct JsonFavoritesStore {
    path: PathBuf,
    cache: Mutex<Option<BTreeMap<u32, FavoriteRecord>>>,
}

impl JsonFavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    /// Store under the platform data directory
    pub fn in_data_dir() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".local")
                    .join("share")
            })
            .join("character-catalog");
        Self::new(data_dir.join("favorites.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<BTreeMap<u32, FavoriteRecord>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "No favorites file yet");
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(BridgeError::Io(e)),
        };

        let records: Vec<FavoriteRecord> = serde_json::from_slice(&bytes).map_err(|e| {
            BridgeError::OperationFailed(format!(
                "Corrupt favorites file {}: {e}",
                self.path.display()
            ))
        })?;
        debug!(path = ?self.path, count = records.len(), "Loaded favorites file");
        Ok(records.into_iter().map(|r| (r.id, r)).collect())
    }

    async fn write_file(&self, records: &BTreeMap<u32, FavoriteRecord>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let list: Vec<&FavoriteRecord> = records.values().collect();
        let json = serde_json::to_vec_pretty(&list)
            .map_err(|e| BridgeError::OperationFailed(format!("Serialize favorites: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Run `f` against the loaded records, persisting when it reports a change
    ///
    /// `f` works on a copy; the cache only takes the change once the file
    /// write succeeded.
    async fn with_records<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<u32, FavoriteRecord>) -> (T, bool),
    ) -> Result<T> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.read_file().await?);
        }
        let records = cache.get_or_insert_with(BTreeMap::new);

        let mut updated = records.clone();
        let (value, changed) = f(&mut updated);
        if changed {
            self.write_file(&updated).await?;
            *records = updated;
        }
        Ok(value)
    }
}

#[async_trait]
impl FavoritesStore for JsonFavoritesStore {
    async fn is_favorite(&self, id: u32) -> Result<bool> {
        self.with_records(|records| (records.contains_key(&id), false))
            .await
    }

    async fn add(&self, record: FavoriteRecord) -> Result<()> {
        let id = record.id;
        self.with_records(|records| {
            records.insert(record.id, record);
            ((), true)
        })
        .await?;
        info!(id, "Favorite added");
        Ok(())
    }

    async fn remove(&self, id: u32) -> Result<()> {
        let removed = self
            .with_records(|records| {
                let removed = records.remove(&id).is_some();
                (removed, removed)
            })
            .await?;
        if removed {
            info!(id, "Favorite removed");
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<FavoriteRecord>> {
        self.with_records(|records| (records.values().cloned().collect(), false))
            .await
    }
}
