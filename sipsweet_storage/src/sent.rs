use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sipsweet_models::user::UserId;

use crate::{
    StorageError,
    tiered::{SyncReport, Syncable, TieredStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentReminder {
    pub sent_at: DateTime<Utc>,
}

impl Syncable for SentReminder {
    fn updated_at(&self) -> DateTime<Utc> {
        self.sent_at
    }
}

/// When each user last actually received a reminder.
///
/// Re-reading this before every evaluation keeps repeated triggers from
/// sending twice within one interval.
pub struct SentReminderLog {
    store: Arc<TieredStore<UserId, SentReminder>>,
}

impl SentReminderLog {
    pub fn new(store: Arc<TieredStore<UserId, SentReminder>>) -> Self {
        Self { store }
    }

    pub async fn last_sent(&self, user_id: UserId) -> Result<Option<DateTime<Utc>>, StorageError> {
        Ok(self.store.get(&user_id).await?.map(|sent| sent.sent_at))
    }

    pub async fn record(&self, user_id: UserId, sent_at: DateTime<Utc>) -> Result<(), StorageError> {
        self.store.put(user_id, SentReminder { sent_at }).await?;
        Ok(())
    }

    pub async fn try_sync(&self) -> Result<SyncReport, StorageError> {
        self.store.try_sync().await
    }
}
