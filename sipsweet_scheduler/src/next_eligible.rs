use chrono::{DateTime, Days, NaiveDate, TimeDelta, TimeZone, Utc};
use sipsweet_models::{
    settings::ReminderSettings,
    time_of_day::{MINUTES_PER_DAY, TimeOfDay},
};

use crate::dnd::is_in_dnd_window;

/// Earliest instant the next reminder may fire.
///
/// Starts from `last_sip + interval` (or `now + interval` without a sip) and,
/// if that instant lands inside the DND window, defers it to the end of the
/// window. Only a single deferral is applied.
pub fn next_eligible_instant<Tz: TimeZone>(
    settings: &ReminderSettings,
    last_sip: Option<DateTime<Utc>>,
    now: &DateTime<Tz>,
) -> DateTime<Utc> {
    let now_utc = now.with_timezone(&Utc);
    let naive_next = last_sip.unwrap_or(now_utc) + settings.interval();

    let Some(window) = settings.dnd_window() else {
        return naive_next;
    };

    let naive_local = TimeOfDay::of(&naive_next.with_timezone(&now.timezone()));
    if !is_in_dnd_window(naive_local, window.start, window.end) {
        return naive_next;
    }

    dnd_end_instant(&window.end, now).max(naive_next)
}

/// The first occurrence of `end` strictly after `now`, today or tomorrow.
pub(crate) fn dnd_end_instant<Tz: TimeZone>(end: &TimeOfDay, now: &DateTime<Tz>) -> DateTime<Utc> {
    let tz = now.timezone();
    let now_utc = now.with_timezone(&Utc);
    let today = now.date_naive();

    let today_end = local_instant(&tz, today, end);
    if today_end > now_utc {
        return today_end;
    }

    let tomorrow = today
        .checked_add_days(Days::new(1))
        .expect("Not realistic to overflow");
    local_instant(&tz, tomorrow, end)
}

/// Resolves a local wall-clock time to an instant.
///
/// Ambiguous times take the earlier instant; times skipped by a DST gap move
/// to the first valid minute after the gap.
fn local_instant<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: &TimeOfDay) -> DateTime<Utc> {
    let requested = date.and_time(*time.time());

    (0..i64::from(MINUTES_PER_DAY))
        .map(|offset| requested + TimeDelta::minutes(offset))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|instant| instant.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&requested))
}
