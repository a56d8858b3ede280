use std::{path::PathBuf, time::Duration};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use sipsweet_storage::ConflictPolicy;

#[derive(Deserialize, Debug)]
pub struct TelegramSettings {
    pub token: String,
}

#[derive(Deserialize, Debug)]
pub struct TriggerSettings {
    pub check_interval_secs: u64,
}

impl TriggerSettings {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }
}

#[derive(Deserialize, Debug)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
    pub sync_interval_secs: u64,
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,
}

impl StorageSettings {
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }
}

#[derive(Deserialize, Debug)]
pub struct AppSettings {
    pub telegram: TelegramSettings,
    pub trigger: TriggerSettings,
    pub storage: StorageSettings,
}

impl AppSettings {
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("appsettings").required(true))
            .add_source(File::with_name("appsettings.local").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Self::from_config(settings)
    }

    /// Deserializes and rejects periods `tokio::time::interval` cannot tick at.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Self = config.try_deserialize()?;

        if settings.trigger.check_interval_secs == 0 {
            return Err(ConfigError::Message(
                "trigger.check_interval_secs must be greater than zero".to_owned(),
            ));
        }

        if settings.storage.sync_interval_secs == 0 {
            return Err(ConfigError::Message(
                "storage.sync_interval_secs must be greater than zero".to_owned(),
            ));
        }

        Ok(settings)
    }
}
