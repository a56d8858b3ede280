mod error;
mod intake;
mod json_file;
mod memory;
mod sent;
mod settings;
mod tiered;

pub use error::StorageError;
pub use intake::{DayLog, IntakeKey, IntakeLog};
pub use json_file::JsonFileTier;
pub use memory::InMemoryTier;
pub use sent::{SentReminder, SentReminderLog};
pub use settings::{SettingsError, SettingsService};
pub use tiered::{ConflictPolicy, StoreTier, SyncReport, Syncable, TieredStore};

#[cfg(test)]
mod tests;
