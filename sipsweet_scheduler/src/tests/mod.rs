
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use sipsweet_models::time_of_day::{MINUTES_PER_DAY, TimeOfDay};

pub(crate) fn hm(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::from_hm(hour, minute).unwrap()
}

pub(crate) fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub(crate) fn time_of_day_strategy() -> impl Strategy<Value = TimeOfDay> {
    (0..MINUTES_PER_DAY).prop_map(|minutes| hm(minutes / 60, minutes % 60))
}

/// Instants between 1970 and 2096, whole seconds.
pub(crate) fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_000_000_000).prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap())
}
