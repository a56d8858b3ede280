use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use sipsweet_models::{intake::IntakeEvent, settings::ReminderSettings, time_of_day::TimeOfDay};

use crate::{
    decision::{decide, last_sip_today, reminder_anchor},
    dnd::should_send_notification,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DndStatus {
    pub enabled: bool,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
}

/// Read-only view of the reminder state, for status queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderStatus {
    /// The interval since the last sip or reminder has elapsed, regardless of DND.
    pub should_send_reminder: bool,
    pub is_dnd_active: bool,
    pub last_sip: Option<DateTime<Utc>>,
    pub last_reminder: Option<DateTime<Utc>>,
    pub next_reminder: DateTime<Utc>,
    pub interval_minutes: u32,
    pub dnd: DndStatus,
}

/// Status as the trigger sees it: anchored on the same instant the trigger
/// uses, so the reported next reminder is the one that will actually fire.
pub fn reminder_status<Tz: TimeZone>(
    settings: &ReminderSettings,
    today_events: &[IntakeEvent],
    last_sent: Option<DateTime<Utc>>,
    now: &DateTime<Tz>,
) -> ReminderStatus {
    let decision = decide(settings, reminder_anchor(today_events, last_sent, now), now);

    ReminderStatus {
        should_send_reminder: decision.should_send || decision.blocked_by_dnd,
        is_dnd_active: !should_send_notification(settings, now),
        last_sip: last_sip_today(today_events, now),
        last_reminder: last_sent,
        next_reminder: decision.next_eligible_instant,
        interval_minutes: settings.interval_minutes,
        dnd: DndStatus {
            enabled: settings.dnd_enabled,
            start: settings.dnd_start,
            end: settings.dnd_end,
        },
    }
}
