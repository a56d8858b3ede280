use chrono::{DateTime, Datelike, Days, Timelike, Utc};
use sipsweet_models::{
    intake::{IntakeEvent, SipSize},
    progress::{DailyProgress, weekly_progress},
    user::UserId,
};
use sipsweet_scheduler::{
    message::{dnd_status_message, greeting},
    status::reminder_status,
};
use sipsweet_storage::{IntakeLog, SentReminderLog, SettingsService};

use crate::{NOT_REGISTERED, text};

pub(crate) async fn start(
    user_id: UserId,
    now: DateTime<Utc>,
    settings: &SettingsService,
) -> anyhow::Result<String> {
    let user_settings = settings.register(user_id, now).await?;
    let local_now = now.with_timezone(&user_settings.timezone);

    let sizes = SipSize::ALL
        .iter()
        .map(|size| format!("{} {} /sip {}", size.emoji(), size.label(), size.amount_ml()))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        "{}! {}\nI'll remind you to drink water. Log your sips with:\n{sizes}",
        greeting(user_settings.nickname, local_now.hour()),
        user_settings.flower.emoji()
    ))
}

pub(crate) async fn log_sip(
    user_id: UserId,
    amount_ml: u32,
    now: DateTime<Utc>,
    settings: &SettingsService,
    intake: &IntakeLog,
) -> anyhow::Result<String> {
    let Some(user_settings) = settings.get(user_id).await? else {
        return Ok(NOT_REGISTERED.to_owned());
    };

    let event = match IntakeEvent::new(amount_ml, now) {
        Ok(event) => event,
        Err(err) => return Ok(err.to_string()),
    };

    let today = event.local_date(&user_settings.timezone);
    let day_log = intake.append(user_id, today, event).await?;
    let progress = DailyProgress::for_date(
        &day_log.events,
        user_settings.daily_goal_ml,
        today,
        &user_settings.timezone,
    );

    Ok(format!(
        "Logged {amount_ml}ml 💧\n{}",
        text::progress_text(&user_settings, &progress)
    ))
}

pub(crate) async fn progress(
    user_id: UserId,
    now: DateTime<Utc>,
    settings: &SettingsService,
    intake: &IntakeLog,
) -> anyhow::Result<String> {
    let Some(user_settings) = settings.get(user_id).await? else {
        return Ok(NOT_REGISTERED.to_owned());
    };

    let today = now.with_timezone(&user_settings.timezone).date_naive();
    let events = intake.events_on(user_id, today).await?;
    let progress = DailyProgress::for_date(
        &events,
        user_settings.daily_goal_ml,
        today,
        &user_settings.timezone,
    );

    Ok(text::progress_text(&user_settings, &progress))
}

pub(crate) async fn week(
    user_id: UserId,
    now: DateTime<Utc>,
    settings: &SettingsService,
    intake: &IntakeLog,
) -> anyhow::Result<String> {
    let Some(user_settings) = settings.get(user_id).await? else {
        return Ok(NOT_REGISTERED.to_owned());
    };

    let today = now.with_timezone(&user_settings.timezone).date_naive();
    let week_start = today - Days::new(u64::from(today.weekday().num_days_from_sunday()));
    let week_end = week_start + Days::new(6);

    let events = intake.events_between(user_id, week_start, week_end).await?;
    let week = weekly_progress(
        &events,
        user_settings.daily_goal_ml,
        today,
        &user_settings.timezone,
    );

    Ok(text::week_text(&week))
}

/// Reports the same next reminder the trigger would act on, counting the
/// last delivered reminder as well as the last sip.
pub(crate) async fn status(
    user_id: UserId,
    now: DateTime<Utc>,
    settings: &SettingsService,
    intake: &IntakeLog,
    sent: &SentReminderLog,
) -> anyhow::Result<String> {
    let Some(user_settings) = settings.get(user_id).await? else {
        return Ok(NOT_REGISTERED.to_owned());
    };

    let local_now = now.with_timezone(&user_settings.timezone);
    let events = intake.events_on(user_id, local_now.date_naive()).await?;
    let last_sent = sent.last_sent(user_id).await?;

    let status = reminder_status(&user_settings.reminder, &events, last_sent, &local_now);
    let dnd_message = dnd_status_message(&user_settings.reminder, &local_now);

    Ok(text::status_text(&user_settings, &status, dnd_message))
}
