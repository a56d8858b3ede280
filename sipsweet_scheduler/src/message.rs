use chrono::{DateTime, TimeZone};
use rand::Rng;
use serde::Serialize;
use sipsweet_models::{
    settings::ReminderSettings,
    theme::{FlowerType, Nickname},
    time_of_day::TimeOfDay,
};

use crate::dnd::is_in_dnd_window;

pub const TEMPLATE_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HydrationMessage {
    pub title: String,
    pub body: String,
}

pub fn message_for(template: usize, nickname: Nickname, flower: FlowerType) -> HydrationMessage {
    let emoji = flower.emoji();
    let (title, body) = match template % TEMPLATE_COUNT {
        0 => (
            format!("Time to hydrate, {nickname}! {emoji}"),
            "Your beautiful petals need water to bloom. Take a sip! 💧",
        ),
        1 => (
            format!("Gentle reminder, {nickname} {emoji}"),
            "Like flowers need water, you need hydration. Sip something lovely! ✨",
        ),
        2 => (
            format!("{nickname}, your garden awaits! {emoji}"),
            "Time to water your inner garden. A small sip makes a big difference! 🌸",
        ),
        _ => (
            format!("Sweet {nickname} {emoji}"),
            "Your body is like a delicate flower - it needs water to stay beautiful! 💕",
        ),
    };

    HydrationMessage {
        title,
        body: body.to_owned(),
    }
}

pub fn pick_message<R: Rng + ?Sized>(
    rng: &mut R,
    nickname: Nickname,
    flower: FlowerType,
) -> HydrationMessage {
    message_for(rng.random_range(0..TEMPLATE_COUNT), nickname, flower)
}

pub fn random_message(nickname: Nickname, flower: FlowerType) -> HydrationMessage {
    pick_message(&mut rand::rng(), nickname, flower)
}

/// "Do not disturb until 11:00 AM" while the window covers `now`.
pub fn dnd_status_message<Tz: TimeZone>(
    settings: &ReminderSettings,
    now: &DateTime<Tz>,
) -> Option<String> {
    let window = settings.dnd_window()?;

    is_in_dnd_window(TimeOfDay::of(now), window.start, window.end)
        .then(|| format!("Do not disturb until {}", window.end.format_12h()))
}

pub fn greeting(nickname: Nickname, hour: u32) -> String {
    let time_greeting = match hour {
        0..12 => "Good morning",
        12..17 => "Good afternoon",
        _ => "Good evening",
    };

    format!("{time_greeting}, {nickname}")
}
