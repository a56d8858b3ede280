use std::{io::ErrorKind, marker::PhantomData, path::PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::{StorageError, tiered::StoreTier};

/// Keeps every entry of one collection in a single JSON file.
///
/// The whole file is rewritten on each put through a temporary file, so a
/// crash never leaves a half-written collection behind.
pub struct JsonFileTier<K, V> {
    path: PathBuf,
    lock: Mutex<()>,
    _entries: PhantomData<fn() -> (K, V)>,
}

impl<K, V> JsonFileTier<K, V>
where
    K: Serialize + DeserializeOwned + PartialEq + Send + Sync,
    V: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _entries: PhantomData,
        }
    }

    async fn read_entries(&self) -> Result<Vec<(K, V)>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_entries(&self, entries: &[(K, V)]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, serde_json::to_vec_pretty(entries)?).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl<K, V> StoreTier<K, V> for JsonFileTier<K, V>
where
    K: Serialize + DeserializeOwned + PartialEq + Clone + Send + Sync + 'static,
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<Option<V>, StorageError> {
        let _guard = self.lock.lock().await;
        let entries = self.read_entries().await?;

        Ok(entries
            .into_iter()
            .find_map(|(entry_key, value)| (entry_key == *key).then_some(value)))
    }

    async fn put(&self, key: K, value: V) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;

        match entries.iter_mut().find(|(entry_key, _)| *entry_key == key) {
            Some((_, existing)) => *existing = value,
            None => entries.push((key, value)),
        }

        self.write_entries(&entries).await
    }

    async fn keys(&self) -> Result<Vec<K>, StorageError> {
        let _guard = self.lock.lock().await;
        let entries = self.read_entries().await?;

        Ok(entries.into_iter().map(|(key, _)| key).collect())
    }
}
