use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationError,
    theme::{FlowerType, Nickname},
    time_of_day::TimeOfDay,
};

pub const MIN_INTERVAL_MINUTES: u32 = 15;
pub const MAX_INTERVAL_MINUTES: u32 = 480;
pub const DEFAULT_INTERVAL_MINUTES: u32 = 120;
/// Default interval of records written before the default moved to two hours.
pub const LEGACY_DEFAULT_INTERVAL_MINUTES: u32 = 60;

pub const MIN_DAILY_GOAL_ML: u32 = 500;
pub const MAX_DAILY_GOAL_ML: u32 = 5000;
pub const DEFAULT_DAILY_GOAL_ML: u32 = 2000;

/// The part of the user settings the reminder evaluator reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub interval_minutes: u32,
    #[serde(default)]
    pub dnd_enabled: bool,
    #[serde(default)]
    pub dnd_start: Option<TimeOfDay>,
    #[serde(default)]
    pub dnd_end: Option<TimeOfDay>,
}

/// A fully configured quiet-hours window. `start > end` wraps midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DndWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl DndWindow {
    pub fn is_overnight(&self) -> bool {
        self.start > self.end
    }
}

impl ReminderSettings {
    pub fn without_dnd(interval_minutes: u32) -> Self {
        Self {
            interval_minutes,
            dnd_enabled: false,
            dnd_start: None,
            dnd_end: None,
        }
    }

    pub fn with_dnd(interval_minutes: u32, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            interval_minutes,
            dnd_enabled: true,
            dnd_start: Some(start),
            dnd_end: Some(end),
        }
    }

    pub fn interval(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.interval_minutes))
    }

    /// The active window, or `None` when DND is off or only half configured.
    pub fn dnd_window(&self) -> Option<DndWindow> {
        if !self.dnd_enabled {
            return None;
        }

        match (self.dnd_start, self.dnd_end) {
            (Some(start), Some(end)) => Some(DndWindow { start, end }),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES).contains(&self.interval_minutes) {
            return Err(ValidationError::IntervalOutOfRange(self.interval_minutes));
        }

        Ok(())
    }
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self::with_dnd(
            DEFAULT_INTERVAL_MINUTES,
            default_dnd_start(),
            default_dnd_end(),
        )
    }
}

fn default_dnd_start() -> TimeOfDay {
    TimeOfDay::from_hm(2, 0).expect("This is always in bounds.")
}

fn default_dnd_end() -> TimeOfDay {
    TimeOfDay::from_hm(11, 0).expect("This is always in bounds.")
}

/// Version written with every stored settings record. Records without one
/// predate versioning and get migrated when read.
pub const SETTINGS_SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SettingsRecord")]
pub struct UserSettings {
    pub schema_version: u32,
    pub nickname: Nickname,
    pub daily_goal_ml: u32,
    pub flower: FlowerType,
    pub timezone: Tz,
    #[serde(flatten)]
    pub reminder: ReminderSettings,
    pub updated_at: DateTime<Utc>,
}

impl UserSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_DAILY_GOAL_ML..=MAX_DAILY_GOAL_ML).contains(&self.daily_goal_ml) {
            return Err(ValidationError::GoalOutOfRange(self.daily_goal_ml));
        }

        self.reminder.validate()
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            nickname: Nickname::default(),
            daily_goal_ml: DEFAULT_DAILY_GOAL_ML,
            flower: FlowerType::default(),
            timezone: Tz::UTC,
            reminder: ReminderSettings::default(),
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// Settings as read from storage.
///
/// Unversioned records come from older clients: any field may be missing and
/// some use older names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsRecord {
    pub schema_version: Option<u32>,
    pub nickname: Option<Nickname>,
    pub daily_goal_ml: Option<u32>,
    pub interval_minutes: Option<u32>,
    #[serde(alias = "flower_type")]
    pub flower: Option<FlowerType>,
    pub timezone: Option<Tz>,
    pub dnd_enabled: Option<bool>,
    #[serde(alias = "dnd_start_time")]
    pub dnd_start: Option<TimeOfDay>,
    #[serde(alias = "dnd_end_time")]
    pub dnd_end: Option<TimeOfDay>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SettingsRecord {
    pub fn is_legacy(&self) -> bool {
        self.schema_version.is_none()
    }
}

impl From<SettingsRecord> for UserSettings {
    /// Missing fields fall back to the defaults. Legacy records also get the
    /// default quiet hours, and their old one-hour default interval moves to
    /// the current default.
    fn from(value: SettingsRecord) -> Self {
        let defaults = UserSettings::default();
        let legacy = value.is_legacy();

        let interval_minutes = match value.interval_minutes {
            None => DEFAULT_INTERVAL_MINUTES,
            Some(LEGACY_DEFAULT_INTERVAL_MINUTES) if legacy => DEFAULT_INTERVAL_MINUTES,
            Some(interval) => interval,
        };
        let (dnd_start, dnd_end) = if legacy {
            (
                value.dnd_start.or(defaults.reminder.dnd_start),
                value.dnd_end.or(defaults.reminder.dnd_end),
            )
        } else {
            (value.dnd_start, value.dnd_end)
        };

        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            nickname: value.nickname.unwrap_or(defaults.nickname),
            daily_goal_ml: value.daily_goal_ml.unwrap_or(defaults.daily_goal_ml),
            flower: value.flower.unwrap_or(defaults.flower),
            timezone: value.timezone.unwrap_or(defaults.timezone),
            reminder: ReminderSettings {
                interval_minutes,
                dnd_enabled: value.dnd_enabled.unwrap_or(defaults.reminder.dnd_enabled),
                dnd_start,
                dnd_end,
            },
            updated_at: value.updated_at.unwrap_or(defaults.updated_at),
        }
    }
}
