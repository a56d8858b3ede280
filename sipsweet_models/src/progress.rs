use chrono::{Datelike, Days, NaiveDate, TimeZone};
use serde::Serialize;

use crate::intake::IntakeEvent;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub total_ml: u32,
    pub goal_ml: u32,
    /// Capped at 100.
    pub percentage: f64,
    pub events: Vec<IntakeEvent>,
}

impl DailyProgress {
    pub fn for_date<Tz: TimeZone>(
        events: &[IntakeEvent],
        goal_ml: u32,
        date: NaiveDate,
        tz: &Tz,
    ) -> Self {
        let mut events: Vec<IntakeEvent> = events
            .iter()
            .filter(|event| event.local_date(tz) == date)
            .copied()
            .collect();
        events.sort_by_key(|event| event.timestamp);

        let total_ml = events.iter().map(|event| event.amount_ml).sum();

        Self {
            date,
            total_ml,
            goal_ml,
            percentage: percentage(total_ml, goal_ml),
            events,
        }
    }

    pub fn remaining_ml(&self) -> u32 {
        self.goal_ml.saturating_sub(self.total_ml)
    }

    pub fn is_goal_reached(&self) -> bool {
        self.percentage >= 100.0
    }

    pub fn petals_completed(&self, total_petals: u32) -> u32 {
        (self.percentage / 100.0 * f64::from(total_petals)).floor() as u32
    }

    pub fn average_sip_ml(&self) -> Option<u32> {
        let count = u32::try_from(self.events.len()).ok().filter(|count| *count > 0)?;
        Some((f64::from(self.total_ml) / f64::from(count)).round() as u32)
    }
}

fn percentage(total_ml: u32, goal_ml: u32) -> f64 {
    if goal_ml == 0 {
        return if total_ml > 0 { 100.0 } else { 0.0 };
    }

    (f64::from(total_ml) * 100.0 / f64::from(goal_ml)).min(100.0)
}

/// Seven days of progress, starting on the Sunday of the week containing `today`.
pub fn weekly_progress<Tz: TimeZone>(
    events: &[IntakeEvent],
    goal_ml: u32,
    today: NaiveDate,
    tz: &Tz,
) -> Vec<DailyProgress> {
    let week_start = today - Days::new(u64::from(today.weekday().num_days_from_sunday()));

    week_start
        .iter_days()
        .take(7)
        .map(|date| DailyProgress::for_date(events, goal_ml, date, tz))
        .collect()
}
