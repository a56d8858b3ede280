//! A local tier and a remote tier behind one read-through, write-through
//! interface.
//!
//! Reads prefer the remote tier and fall back to the local copy when it is
//! unreachable. Writes always land locally first; a key whose remote write
//! failed is remembered as dirty and pushed again by [`TieredStore::try_sync`].
//! Whenever both tiers hold a value, the [`ConflictPolicy`] picks the result.

use std::{collections::HashSet, fmt::Debug, hash::Hash, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::StorageError;

#[async_trait]
pub trait StoreTier<K, V>: Send + Sync {
    async fn get(&self, key: &K) -> Result<Option<V>, StorageError>;
    async fn put(&self, key: K, value: V) -> Result<(), StorageError>;
    async fn keys(&self) -> Result<Vec<K>, StorageError>;
}

pub trait Syncable: Clone + Send + Sync + 'static {
    fn updated_at(&self) -> DateTime<Utc>;

    /// Combines divergent copies. Defaults to last write wins, local on ties.
    fn merge(local: Self, remote: Self) -> Self {
        if remote.updated_at() > local.updated_at() {
            remote
        } else {
            local
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    #[default]
    LastWriteWins,
    PreferLocal,
    PreferRemote,
    Merge,
}

impl ConflictPolicy {
    pub fn resolve<V: Syncable>(self, local: V, remote: V) -> V {
        match self {
            ConflictPolicy::LastWriteWins => {
                if remote.updated_at() > local.updated_at() {
                    remote
                } else {
                    local
                }
            }
            ConflictPolicy::PreferLocal => local,
            ConflictPolicy::PreferRemote => remote,
            ConflictPolicy::Merge => V::merge(local, remote),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub synced: usize,
    pub failed: usize,
}

pub struct TieredStore<K, V> {
    local: Arc<dyn StoreTier<K, V>>,
    remote: Arc<dyn StoreTier<K, V>>,
    policy: ConflictPolicy,
    dirty: RwLock<HashSet<K>>,
}

impl<K, V> TieredStore<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Syncable,
{
    pub fn new(
        local: Arc<dyn StoreTier<K, V>>,
        remote: Arc<dyn StoreTier<K, V>>,
        policy: ConflictPolicy,
    ) -> Self {
        Self {
            local,
            remote,
            policy,
            dirty: RwLock::new(HashSet::new()),
        }
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    pub async fn get(&self, key: &K) -> Result<Option<V>, StorageError> {
        let local = self.local.get(key).await?;

        // Unsynced local changes win until the next sync resolves them.
        if self.dirty.read().await.contains(key) {
            return Ok(local);
        }

        match self.remote.get(key).await {
            Ok(Some(remote)) => {
                let resolved = match local {
                    Some(local) => self.policy.resolve(local, remote),
                    None => remote,
                };
                self.local.put(key.clone(), resolved.clone()).await?;

                Ok(Some(resolved))
            }
            Ok(None) => Ok(local),
            Err(err) => {
                log::warn!("Remote read failed, using local copy. [key = {key:?}, error = {err}]");
                Ok(local)
            }
        }
    }

    /// Stores `value` locally and tries the remote tier. A remote failure is
    /// not an error; the key stays dirty until [`Self::try_sync`] succeeds.
    pub async fn put(&self, key: K, value: V) -> Result<V, StorageError> {
        self.local.put(key.clone(), value.clone()).await?;

        match self.remote.put(key.clone(), value.clone()).await {
            Ok(()) => {
                self.dirty.write().await.remove(&key);
            }
            Err(err) => {
                log::warn!("Remote write failed, keeping local change. [key = {key:?}, error = {err}]");
                self.dirty.write().await.insert(key);
            }
        }

        Ok(value)
    }

    pub async fn try_sync(&self) -> Result<SyncReport, StorageError> {
        let pending: Vec<K> = self.dirty.read().await.iter().cloned().collect();
        let mut report = SyncReport::default();

        for key in pending {
            let Some(local) = self.local.get(&key).await? else {
                self.dirty.write().await.remove(&key);
                continue;
            };

            let resolved = match self.remote.get(&key).await {
                Ok(Some(remote)) => self.policy.resolve(local, remote),
                Ok(None) => local,
                Err(err) => {
                    log::warn!("Sync read failed. [key = {key:?}, error = {err}]");
                    report.failed += 1;
                    continue;
                }
            };

            match self.remote.put(key.clone(), resolved.clone()).await {
                Ok(()) => {
                    self.local.put(key.clone(), resolved).await?;
                    self.dirty.write().await.remove(&key);
                    report.synced += 1;
                }
                Err(err) => {
                    log::warn!("Sync write failed. [key = {key:?}, error = {err}]");
                    report.failed += 1;
                }
            }
        }

        if report.synced > 0 {
            log::info!("Synced {} pending changes", report.synced);
        }

        Ok(report)
    }

    pub async fn has_pending_changes(&self) -> bool {
        !self.dirty.read().await.is_empty()
    }

    /// Keys known to either tier. Falls back to local keys when the remote
    /// tier is unreachable.
    pub async fn keys(&self) -> Result<Vec<K>, StorageError> {
        let mut keys: HashSet<K> = self.local.keys().await?.into_iter().collect();

        match self.remote.keys().await {
            Ok(remote) => keys.extend(remote),
            Err(err) => log::warn!("Remote key listing failed. [error = {err}]"),
        }

        Ok(keys.into_iter().collect())
    }
}
