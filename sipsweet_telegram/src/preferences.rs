//! Commands that change user settings.
//!
//! Every change goes through [`SettingsService::update`]. Validation and
//! parse failures are replied to the user instead of failing the handler.

use chrono::{DateTime, Utc};
use sipsweet_models::{
    chrono_tz::Tz,
    settings::{ReminderSettings, UserSettings},
    theme::{FlowerType, Nickname},
    time_of_day::TimeOfDay,
    user::UserId,
};
use sipsweet_storage::{SettingsError, SettingsService};

use crate::{NOT_REGISTERED, text};

const DND_USAGE: &str = "Use /dnd 22:00 07:00 to set quiet hours, or /dnd off.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DndChange {
    Off,
    On,
    Window { start: TimeOfDay, end: TimeOfDay },
}

impl DndChange {
    pub(crate) fn parse(arg: &str) -> Result<Self, String> {
        let parts = arg.split_whitespace().collect::<Vec<_>>();

        match parts.as_slice() {
            [toggle] if toggle.eq_ignore_ascii_case("off") => Ok(Self::Off),
            [toggle] if toggle.eq_ignore_ascii_case("on") => Ok(Self::On),
            [start, end] => Ok(Self::Window {
                start: start.parse::<TimeOfDay>().map_err(|err| format!("{err}. {DND_USAGE}"))?,
                end: end.parse::<TimeOfDay>().map_err(|err| format!("{err}. {DND_USAGE}"))?,
            }),
            _ => Err(DND_USAGE.to_owned()),
        }
    }

    fn apply(self, reminder: &mut ReminderSettings) {
        match self {
            DndChange::Off => reminder.dnd_enabled = false,
            DndChange::On => {
                // Turning quiet hours back on without bounds restores the default window.
                let defaults = ReminderSettings::default();
                reminder.dnd_enabled = true;
                if reminder.dnd_start.is_none() || reminder.dnd_end.is_none() {
                    reminder.dnd_start = defaults.dnd_start;
                    reminder.dnd_end = defaults.dnd_end;
                }
            }
            DndChange::Window { start, end } => {
                *reminder = ReminderSettings::with_dnd(reminder.interval_minutes, start, end);
            }
        }
    }
}

pub(crate) async fn show(user_id: UserId, settings: &SettingsService) -> anyhow::Result<String> {
    Ok(match settings.get(user_id).await? {
        Some(user_settings) => text::settings_text(&user_settings),
        None => NOT_REGISTERED.to_owned(),
    })
}

pub(crate) async fn set_interval(
    user_id: UserId,
    minutes: u32,
    now: DateTime<Utc>,
    settings: &SettingsService,
) -> anyhow::Result<String> {
    apply(user_id, now, settings, |s| s.reminder.interval_minutes = minutes).await
}

pub(crate) async fn set_goal(
    user_id: UserId,
    goal_ml: u32,
    now: DateTime<Utc>,
    settings: &SettingsService,
) -> anyhow::Result<String> {
    apply(user_id, now, settings, |s| s.daily_goal_ml = goal_ml).await
}

pub(crate) async fn set_dnd(
    user_id: UserId,
    arg: &str,
    now: DateTime<Utc>,
    settings: &SettingsService,
) -> anyhow::Result<String> {
    match DndChange::parse(arg) {
        Ok(change) => apply(user_id, now, settings, |s| change.apply(&mut s.reminder)).await,
        Err(usage) => Ok(usage),
    }
}

pub(crate) async fn set_timezone(
    user_id: UserId,
    arg: &str,
    now: DateTime<Utc>,
    settings: &SettingsService,
) -> anyhow::Result<String> {
    let Ok(timezone) = arg.trim().parse::<Tz>() else {
        return Ok(format!(
            "Unknown time zone {:?}, use a name like Europe/Berlin",
            arg.trim()
        ));
    };

    apply(user_id, now, settings, |s| s.timezone = timezone).await
}

pub(crate) async fn set_nickname(
    user_id: UserId,
    arg: &str,
    now: DateTime<Utc>,
    settings: &SettingsService,
) -> anyhow::Result<String> {
    match arg.parse::<Nickname>() {
        Ok(nickname) => apply(user_id, now, settings, |s| s.nickname = nickname).await,
        Err(err) => Ok(err.to_string()),
    }
}

pub(crate) async fn set_flower(
    user_id: UserId,
    arg: &str,
    now: DateTime<Utc>,
    settings: &SettingsService,
) -> anyhow::Result<String> {
    match arg.parse::<FlowerType>() {
        Ok(flower) => apply(user_id, now, settings, |s| s.flower = flower).await,
        Err(err) => Ok(err.to_string()),
    }
}

async fn apply<F>(
    user_id: UserId,
    now: DateTime<Utc>,
    settings: &SettingsService,
    mutate: F,
) -> anyhow::Result<String>
where
    F: FnOnce(&mut UserSettings) + Send,
{
    match settings.update(user_id, now, mutate).await {
        Ok(updated) => Ok(format!(
            "Saved {}\n{}",
            updated.flower.emoji(),
            text::settings_text(&updated)
        )),
        Err(SettingsError::Validation(err)) => Ok(err.to_string()),
        Err(SettingsError::UnknownUser(_)) => Ok(NOT_REGISTERED.to_owned()),
        Err(err) => Err(err.into()),
    }
}
