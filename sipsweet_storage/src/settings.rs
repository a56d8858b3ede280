use std::sync::Arc;

use chrono::{DateTime, Utc};
use sipsweet_models::{error::ValidationError, settings::UserSettings, user::UserId};
use thiserror::Error;

use crate::{
    StorageError,
    tiered::{SyncReport, Syncable, TieredStore},
};

impl Syncable for UserSettings {
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No settings registered for user {0}")]
    UnknownUser(UserId),
}

/// Owner of the per-user settings.
///
/// Changes go through [`SettingsService::update`]: load, mutate, validate,
/// persist, and hand back the value that was actually stored.
pub struct SettingsService {
    store: Arc<TieredStore<UserId, UserSettings>>,
}

impl SettingsService {
    pub fn new(store: Arc<TieredStore<UserId, UserSettings>>) -> Self {
        Self { store }
    }

    pub async fn get(&self, user_id: UserId) -> Result<Option<UserSettings>, SettingsError> {
        Ok(self.store.get(&user_id).await?)
    }

    pub async fn load(&self, user_id: UserId) -> Result<UserSettings, SettingsError> {
        self.get(user_id)
            .await?
            .ok_or(SettingsError::UnknownUser(user_id))
    }

    /// Stores default settings for a new user. Existing settings are kept.
    pub async fn register(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<UserSettings, SettingsError> {
        if let Some(existing) = self.get(user_id).await? {
            return Ok(existing);
        }

        log::info!("Registering user {user_id} with default settings");
        let settings = UserSettings {
            updated_at: now,
            ..UserSettings::default()
        };

        Ok(self.store.put(user_id, settings).await?)
    }

    pub async fn update<F>(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
        mutate: F,
    ) -> Result<UserSettings, SettingsError>
    where
        F: FnOnce(&mut UserSettings) + Send,
    {
        let mut settings = self.load(user_id).await?;
        mutate(&mut settings);
        settings.validate()?;
        settings.updated_at = now;

        let stored = self.store.put(user_id, settings).await?;
        log::info!("Updated settings for user {user_id}");

        Ok(stored)
    }

    pub async fn users(&self) -> Result<Vec<UserId>, SettingsError> {
        Ok(self.store.keys().await?)
    }

    pub async fn try_sync(&self) -> Result<SyncReport, StorageError> {
        self.store.try_sync().await
    }
}
