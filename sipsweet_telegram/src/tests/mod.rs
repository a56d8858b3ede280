mod command_tests;

use std::{fmt::Debug, hash::Hash, sync::Arc};

use chrono::{DateTime, TimeZone, Utc};
use sipsweet_models::user::UserId;
use sipsweet_storage::{
    ConflictPolicy, InMemoryTier, IntakeLog, SentReminderLog, SettingsService, Syncable,
    TieredStore,
};

use crate::{Command, reply};

pub(crate) const USER: UserId = 7;

pub(crate) fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

fn in_memory<K, V>() -> Arc<TieredStore<K, V>>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Syncable,
{
    Arc::new(TieredStore::new(
        Arc::new(InMemoryTier::new()),
        Arc::new(InMemoryTier::new()),
        ConflictPolicy::LastWriteWins,
    ))
}

pub(crate) struct TestContext {
    pub settings: SettingsService,
    pub intake: IntakeLog,
    pub sent: SentReminderLog,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            settings: SettingsService::new(in_memory()),
            intake: IntakeLog::new(in_memory()),
            sent: SentReminderLog::new(in_memory()),
        }
    }

    pub async fn registered() -> Self {
        let ctx = Self::new();
        ctx.send(Command::Start, utc(2025, 6, 2, 8, 0)).await;
        ctx
    }

    pub async fn send(&self, cmd: Command, now: DateTime<Utc>) -> String {
        reply(cmd, USER, now, &self.settings, &self.intake, &self.sent)
            .await
            .unwrap()
    }
}
