use std::{collections::HashMap, hash::Hash};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{StorageError, tiered::StoreTier};

pub struct InMemoryTier<K, V> {
    store: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryTier<K, V> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryTier<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K, V> StoreTier<K, V> for InMemoryTier<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<Option<V>, StorageError> {
        Ok(self.store.read().await.get(key).cloned())
    }

    async fn put(&self, key: K, value: V) -> Result<(), StorageError> {
        self.store.write().await.insert(key, value);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<K>, StorageError> {
        Ok(self.store.read().await.keys().cloned().collect())
    }
}
