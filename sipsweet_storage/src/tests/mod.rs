mod intake_tests;
mod tiered_tests;

use std::{
    hash::Hash,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::{InMemoryTier, StorageError, StoreTier};

/// In-memory tier that can be switched off to simulate an unreachable remote.
pub(crate) struct FlakyTier<K, V> {
    inner: InMemoryTier<K, V>,
    online: AtomicBool,
}

impl<K, V> FlakyTier<K, V> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryTier::new(),
            online: AtomicBool::new(true),
        })
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::Remote("offline".to_owned()))
        }
    }
}

#[async_trait]
impl<K, V> StoreTier<K, V> for FlakyTier<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<Option<V>, StorageError> {
        self.check()?;
        self.inner.get(key).await
    }

    async fn put(&self, key: K, value: V) -> Result<(), StorageError> {
        self.check()?;
        self.inner.put(key, value).await
    }

    async fn keys(&self) -> Result<Vec<K>, StorageError> {
        self.check()?;
        self.inner.keys().await
    }
}

pub(crate) fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}
