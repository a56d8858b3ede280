/// Telegram chat id of the user owning the settings and the intake log.
pub type UserId = i64;
