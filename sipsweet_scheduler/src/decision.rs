use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sipsweet_models::{intake::IntakeEvent, settings::ReminderSettings};

use crate::{dnd::should_send_notification, next_eligible::next_eligible_instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDecision {
    pub should_send: bool,
    pub next_eligible_instant: DateTime<Utc>,
    /// The interval has elapsed but the DND window suppresses the reminder.
    pub blocked_by_dnd: bool,
}

/// Latest sip among `events` that happened on the local date of `now`.
pub fn last_sip_today<Tz: TimeZone>(
    events: &[IntakeEvent],
    now: &DateTime<Tz>,
) -> Option<DateTime<Utc>> {
    let tz = now.timezone();
    let today = now.date_naive();

    events
        .iter()
        .filter(|event| event.local_date(&tz) == today)
        .map(|event| event.timestamp)
        .max()
}

/// Instant the reminder interval is measured from: the later of today's last
/// sip and the last reminder that was actually sent.
pub fn reminder_anchor<Tz: TimeZone>(
    today_events: &[IntakeEvent],
    last_sent: Option<DateTime<Utc>>,
    now: &DateTime<Tz>,
) -> Option<DateTime<Utc>> {
    last_sip_today(today_events, now).max(last_sent)
}

pub fn evaluate<Tz: TimeZone>(
    settings: &ReminderSettings,
    today_events: &[IntakeEvent],
    now: &DateTime<Tz>,
) -> ReminderDecision {
    decide(settings, last_sip_today(today_events, now), now)
}

/// Decision for an already known anchor, e.g. the later of the last sip and
/// the last reminder that was actually sent.
pub fn decide<Tz: TimeZone>(
    settings: &ReminderSettings,
    last_activity: Option<DateTime<Utc>>,
    now: &DateTime<Tz>,
) -> ReminderDecision {
    let now_utc = now.with_timezone(&Utc);
    let elapsed_ok = last_activity.is_none_or(|last| now_utc - last >= settings.interval());
    let dnd_ok = should_send_notification(settings, now);

    ReminderDecision {
        should_send: elapsed_ok && dnd_ok,
        next_eligible_instant: next_eligible_instant(settings, last_activity, now),
        blocked_by_dnd: elapsed_ok && !dnd_ok,
    }
}
