use chrono::{DateTime, TimeZone};
use sipsweet_models::{settings::ReminderSettings, time_of_day::TimeOfDay};

/// Whether `now` falls inside the inclusive window `[start, end]`.
///
/// A window with `start > end` wraps midnight. `start == end` covers exactly
/// that one minute.
pub fn is_in_dnd_window(now: TimeOfDay, start: TimeOfDay, end: TimeOfDay) -> bool {
    let now = now.minutes_since_midnight();
    let start = start.minutes_since_midnight();
    let end = end.minutes_since_midnight();

    if start > end {
        now >= start || now <= end
    } else {
        start <= now && now <= end
    }
}

/// `false` only while a fully configured DND window covers `now`.
///
/// DND that is enabled but missing a bound is treated as off.
pub fn should_send_notification<Tz: TimeZone>(
    settings: &ReminderSettings,
    now: &DateTime<Tz>,
) -> bool {
    match settings.dnd_window() {
        Some(window) => !is_in_dnd_window(TimeOfDay::of(now), window.start, window.end),
        None => true,
    }
}
