mod delivery;
mod preferences;
mod text;
mod tracking;

pub use delivery::TelegramDeliveryChannel;
pub use teloxide;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sipsweet_models::user::UserId;
use sipsweet_storage::{IntakeLog, SentReminderLog, SettingsService};
use teloxide::{dptree, filter_command, prelude::*, utils::command::BotCommands};

type HandlerResult = anyhow::Result<()>;

const NOT_REGISTERED: &str = "I don't know you yet. Send /start to begin.";

pub struct TelegramInteractionInterface;
impl TelegramInteractionInterface {
    pub async fn start(
        bot: Bot,
        settings: Arc<SettingsService>,
        intake: Arc<IntakeLog>,
        sent: Arc<SentReminderLog>,
    ) {
        log::info!("Starting Telegram interaction interface");

        let command_handler = Update::filter_message()
            .branch(filter_command::<Command, _>().endpoint(handle_command))
            .branch(dptree::endpoint(invalid_message));

        Dispatcher::builder(bot, command_handler)
            .dependencies(dptree::deps![settings, intake, sent])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await
    }
}

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
enum Command {
    #[command(description = "start receiving hydration reminders.")]
    Start,
    #[command(description = "log a sip in ml, e.g. /sip 250.")]
    Sip(u32),
    #[command(description = "show today's progress.")]
    Progress,
    #[command(description = "show this week's progress.")]
    Week,
    #[command(description = "show when the next reminder is due.")]
    Status,
    #[command(description = "show your settings.")]
    Settings,
    #[command(description = "set the reminder interval in minutes, e.g. /interval 90.")]
    Interval(u32),
    #[command(description = "set quiet hours, e.g. /dnd 22:00 07:00, /dnd on or /dnd off.")]
    Dnd(String),
    #[command(description = "set the daily goal in ml, e.g. /goal 2500.")]
    Goal(u32),
    #[command(description = "set your time zone, e.g. /timezone Europe/Berlin.")]
    Timezone(String),
    #[command(description = "pick how I call you: princess, babe or sweetie.")]
    Nickname(String),
    #[command(description = "pick your flower: rose, tulip or daisy.")]
    Flower(String),
    #[command(description = "show this text.")]
    Help,
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    settings: Arc<SettingsService>,
    intake: Arc<IntakeLog>,
    sent: Arc<SentReminderLog>,
) -> HandlerResult {
    let user_id = msg.chat.id.0;
    let reply = reply(cmd, user_id, Utc::now(), &settings, &intake, &sent).await?;

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

async fn reply(
    cmd: Command,
    user_id: UserId,
    now: DateTime<Utc>,
    settings: &SettingsService,
    intake: &IntakeLog,
    sent: &SentReminderLog,
) -> anyhow::Result<String> {
    match cmd {
        Command::Start => tracking::start(user_id, now, settings).await,
        Command::Sip(amount_ml) => tracking::log_sip(user_id, amount_ml, now, settings, intake).await,
        Command::Progress => tracking::progress(user_id, now, settings, intake).await,
        Command::Week => tracking::week(user_id, now, settings, intake).await,
        Command::Status => tracking::status(user_id, now, settings, intake, sent).await,
        Command::Settings => preferences::show(user_id, settings).await,
        Command::Interval(minutes) => {
            preferences::set_interval(user_id, minutes, now, settings).await
        }
        Command::Dnd(arg) => preferences::set_dnd(user_id, &arg, now, settings).await,
        Command::Goal(goal_ml) => preferences::set_goal(user_id, goal_ml, now, settings).await,
        Command::Timezone(arg) => preferences::set_timezone(user_id, &arg, now, settings).await,
        Command::Nickname(arg) => preferences::set_nickname(user_id, &arg, now, settings).await,
        Command::Flower(arg) => preferences::set_flower(user_id, &arg, now, settings).await,
        Command::Help => Ok(Command::descriptions().to_string()),
    }
}

async fn invalid_message(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        "Unable to handle the message. Use /help to see what I understand.",
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests;
