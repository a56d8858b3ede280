use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sipsweet_models::{intake::IntakeEvent, user::UserId};

use crate::{
    StorageError,
    tiered::{SyncReport, Syncable, TieredStore},
};

/// A user's local calendar date.
pub type IntakeKey = (UserId, NaiveDate);

/// All sips of one user on one local date, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLog {
    pub events: Vec<IntakeEvent>,
    pub updated_at: DateTime<Utc>,
}

impl Syncable for DayLog {
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Logs are append-only, so divergent copies are unioned.
    fn merge(local: Self, remote: Self) -> Self {
        let updated_at = local.updated_at.max(remote.updated_at);
        let mut events = local.events;
        events.extend(remote.events);
        events.sort_by_key(|event| (event.timestamp, event.amount_ml));
        events.dedup();

        Self { events, updated_at }
    }
}

pub struct IntakeLog {
    store: Arc<TieredStore<IntakeKey, DayLog>>,
}

impl IntakeLog {
    pub fn new(store: Arc<TieredStore<IntakeKey, DayLog>>) -> Self {
        Self { store }
    }

    /// Appends `event` to the log of `date`, the user's local date of the sip.
    pub async fn append(
        &self,
        user_id: UserId,
        date: NaiveDate,
        event: IntakeEvent,
    ) -> Result<DayLog, StorageError> {
        let key = (user_id, date);
        let mut day_log = self.store.get(&key).await?.unwrap_or(DayLog {
            events: Vec::new(),
            updated_at: event.timestamp,
        });

        let position = day_log
            .events
            .partition_point(|existing| existing.timestamp <= event.timestamp);
        day_log.events.insert(position, event);
        day_log.updated_at = day_log.updated_at.max(event.timestamp);

        log::debug!("Logged {} ml for user {user_id} on {date}", event.amount_ml);
        self.store.put(key, day_log).await
    }

    pub async fn events_on(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<Vec<IntakeEvent>, StorageError> {
        Ok(self
            .store
            .get(&(user_id, date))
            .await?
            .map(|day_log| day_log.events)
            .unwrap_or_default())
    }

    /// Events of every date in `from..=to`.
    pub async fn events_between(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<IntakeEvent>, StorageError> {
        let mut events = Vec::new();
        for date in from.iter_days().take_while(|date| *date <= to) {
            events.extend(self.events_on(user_id, date).await?);
        }

        Ok(events)
    }

    pub async fn try_sync(&self) -> Result<SyncReport, StorageError> {
        self.store.try_sync().await
    }
}
