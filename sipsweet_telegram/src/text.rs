use chrono::{DateTime, Utc};
use sipsweet_models::{
    format::{format_interval, format_percentage, format_volume},
    progress::DailyProgress,
    settings::{ReminderSettings, UserSettings},
    time_of_day::TimeOfDay,
};
use sipsweet_scheduler::status::ReminderStatus;

pub(crate) fn progress_text(settings: &UserSettings, progress: &DailyProgress) -> String {
    let petals = settings.flower.petals();
    let bloomed = progress.petals_completed(petals).min(petals);
    let flower = format!(
        "{}{}",
        settings.flower.emoji().repeat(bloomed as usize),
        "·".repeat((petals - bloomed) as usize)
    );

    let mut lines = vec![
        flower,
        format!(
            "{} of {} ({})",
            format_volume(progress.total_ml),
            format_volume(progress.goal_ml),
            format_percentage(progress.percentage)
        ),
    ];

    if progress.is_goal_reached() {
        lines.push(format!("Goal reached, {}! 🎉", settings.nickname));
    } else {
        lines.push(format!("{} to go", format_volume(progress.remaining_ml())));
    }

    if let Some(average) = progress.average_sip_ml() {
        lines.push(format!(
            "{} sips today, {} on average",
            progress.events.len(),
            format_volume(average)
        ));
    }

    lines.join("\n")
}

pub(crate) fn week_text(week: &[DailyProgress]) -> String {
    week.iter()
        .map(|day| {
            let mark = if day.is_goal_reached() { "🌸" } else { "💧" };
            format!(
                "{} {mark} {} ({})",
                day.date.format("%a %d.%m"),
                format_volume(day.total_ml),
                format_percentage(day.percentage)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn status_text(
    settings: &UserSettings,
    status: &ReminderStatus,
    dnd_message: Option<String>,
) -> String {
    let local = |instant: DateTime<Utc>| {
        instant
            .with_timezone(&settings.timezone)
            .format("%H:%M")
            .to_string()
    };

    let mut lines = vec![format!(
        "Reminding every {}",
        format_interval(status.interval_minutes)
    )];

    match status.last_sip {
        Some(last_sip) => lines.push(format!("Last sip at {}", local(last_sip))),
        None => lines.push("No sips yet today".to_owned()),
    }

    if let Some(last_reminder) = status.last_reminder {
        lines.push(format!("Last reminder at {}", local(last_reminder)));
    }

    if status.should_send_reminder && !status.is_dnd_active {
        lines.push("A reminder is due now".to_owned());
    } else {
        lines.push(format!("Next reminder at {}", local(status.next_reminder)));
    }

    lines.push(quiet_hours(status.dnd.enabled, status.dnd.start, status.dnd.end));

    if let Some(dnd_message) = dnd_message {
        lines.push(dnd_message);
    }

    lines.join("\n")
}

pub(crate) fn settings_text(settings: &UserSettings) -> String {
    let ReminderSettings {
        interval_minutes,
        dnd_enabled,
        dnd_start,
        dnd_end,
    } = settings.reminder;

    [
        format!("Nickname: {}", settings.nickname),
        format!("Flower: {} {}", settings.flower.emoji(), settings.flower),
        format!("Daily goal: {}", format_volume(settings.daily_goal_ml)),
        format!("Reminding every {}", format_interval(interval_minutes)),
        quiet_hours(dnd_enabled, dnd_start, dnd_end),
        format!("Time zone: {}", settings.timezone.name()),
    ]
    .join("\n")
}

fn quiet_hours(enabled: bool, start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> String {
    match (enabled, start, end) {
        (true, Some(start), Some(end)) => format!(
            "Quiet hours {} - {}",
            start.format_12h(),
            end.format_12h()
        ),
        _ => "Quiet hours off".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use sipsweet_models::{
        intake::IntakeEvent,
        progress::DailyProgress,
        settings::{ReminderSettings, UserSettings},
        time_of_day::TimeOfDay,
    };
    use sipsweet_scheduler::status::reminder_status;

    use super::*;

    fn sip(amount_ml: u32, hour: u32) -> IntakeEvent {
        IntakeEvent::new(amount_ml, Utc.with_ymd_and_hms(2025, 6, 2, hour, 0, 0).unwrap()).unwrap()
    }

    #[test]
    fn progress_shows_bloomed_petals_and_remaining_volume() {
        let settings = UserSettings::default();
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let progress =
            DailyProgress::for_date(&[sip(250, 9), sip(250, 12)], 2000, date, &Utc);

        let text = progress_text(&settings, &progress);

        assert_eq!(
            text,
            "🌹🌹······\n500ml of 2.0L (25%)\n1.5L to go\n2 sips today, 250ml on average"
        );
    }

    #[test]
    fn reached_goal_is_celebrated() {
        let settings = UserSettings::default();
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let progress = DailyProgress::for_date(&[sip(2000, 9)], 2000, date, &Utc);

        assert!(progress_text(&settings, &progress).contains("Goal reached, Princess!"));
    }

    #[test]
    fn status_in_local_time() {
        let settings = UserSettings {
            timezone: sipsweet_models::chrono_tz::Europe::Berlin,
            reminder: ReminderSettings::with_dnd(
                120,
                TimeOfDay::from_hm(22, 0).unwrap(),
                TimeOfDay::from_hm(6, 0).unwrap(),
            ),
            ..UserSettings::default()
        };
        let now = Utc
            .with_ymd_and_hms(2025, 6, 2, 10, 0, 0)
            .unwrap()
            .with_timezone(&settings.timezone);
        let status = reminder_status(&settings.reminder, &[sip(250, 9)], None, &now);

        let text = status_text(&settings, &status, None);

        assert_eq!(
            text,
            "Reminding every 2h\nLast sip at 11:00\nNext reminder at 13:00\nQuiet hours 10:00 PM - 6:00 AM"
        );
    }
}
