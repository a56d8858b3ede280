use std::{
    fmt::Debug,
    hash::Hash,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use serde::{Serialize, de::DeserializeOwned};
use sipsweet_storage::{
    ConflictPolicy, InMemoryTier, IntakeLog, JsonFileTier, SentReminderLog, SettingsService,
    Syncable, TieredStore,
};
use tokio_util::sync::CancellationToken;

/// Every store the application uses, each with an in-memory local tier and a
/// JSON file under the data directory as its remote tier.
#[derive(Clone)]
pub struct Stores {
    pub settings: Arc<SettingsService>,
    pub intake: Arc<IntakeLog>,
    pub sent: Arc<SentReminderLog>,
}

impl Stores {
    pub fn open(data_dir: &Path, policy: ConflictPolicy) -> Self {
        log::info!("Opening stores in {}", data_dir.display());

        Self {
            settings: Arc::new(SettingsService::new(tiered(
                data_dir.join("settings.json"),
                policy,
            ))),
            intake: Arc::new(IntakeLog::new(tiered(data_dir.join("intake.json"), policy))),
            sent: Arc::new(SentReminderLog::new(tiered(
                data_dir.join("sent_reminders.json"),
                policy,
            ))),
        }
    }

    #[cfg(test)]
    pub fn in_memory(policy: ConflictPolicy) -> Self {
        Self {
            settings: Arc::new(SettingsService::new(in_memory(policy))),
            intake: Arc::new(IntakeLog::new(in_memory(policy))),
            sent: Arc::new(SentReminderLog::new(in_memory(policy))),
        }
    }

    pub async fn sync(&self) {
        let results = [
            ("settings", self.settings.try_sync().await),
            ("intake", self.intake.try_sync().await),
            ("sent reminders", self.sent.try_sync().await),
        ];

        for (name, result) in results {
            match result {
                Ok(report) if report.failed > 0 => {
                    log::warn!("{} {name} changes are still pending sync", report.failed)
                }
                Ok(_) => {}
                Err(err) => log::warn!("Failed to sync {name}. [error = {err}]"),
            }
        }
    }

    pub async fn run_sync(&self, period: Duration, cancellation_token: CancellationToken) {
        let mut interval = tokio::time::interval(period);

        loop {
            tokio::select! {
                _ = cancellation_token.cancelled() => {
                    log::info!("Store sync stopped");
                    break;
                }
                _ = interval.tick() => self.sync().await,
            }
        }

        self.sync().await;
    }
}

fn tiered<K, V>(path: PathBuf, policy: ConflictPolicy) -> Arc<TieredStore<K, V>>
where
    K: Serialize + DeserializeOwned + Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Serialize + DeserializeOwned + Syncable,
{
    Arc::new(TieredStore::new(
        Arc::new(InMemoryTier::new()),
        Arc::new(JsonFileTier::new(path)),
        policy,
    ))
}

#[cfg(test)]
fn in_memory<K, V>(policy: ConflictPolicy) -> Arc<TieredStore<K, V>>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Syncable,
{
    Arc::new(TieredStore::new(
        Arc::new(InMemoryTier::new()),
        Arc::new(InMemoryTier::new()),
        policy,
    ))
}
