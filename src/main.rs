mod appsettings;
mod storage;
mod trigger;

use std::sync::Arc;

use anyhow::Context;
use sipsweet_telegram::{
    TelegramDeliveryChannel, TelegramInteractionInterface, teloxide::Bot,
};
use tokio_util::sync::CancellationToken;

use crate::{appsettings::AppSettings, storage::Stores, trigger::ReminderTrigger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = AppSettings::load().context("Failed to load appsettings")?;
    let stores = Stores::open(&settings.storage.data_dir, settings.storage.conflict_policy);

    let bot = Bot::new(&settings.telegram.token);
    let delivery_channel = Arc::new(TelegramDeliveryChannel::new(bot.clone()));
    let trigger = Arc::new(ReminderTrigger::new(stores.clone(), delivery_channel));

    let cancellation_token = CancellationToken::new();

    let trigger_task = tokio::spawn({
        let trigger = trigger.clone();
        let token = cancellation_token.child_token();
        let period = settings.trigger.check_interval();
        async move { trigger.run(period, token).await }
    });

    let sync_task = tokio::spawn({
        let stores = stores.clone();
        let token = cancellation_token.child_token();
        let period = settings.storage.sync_interval();
        async move { stores.run_sync(period, token).await }
    });

    TelegramInteractionInterface::start(
        bot,
        stores.settings.clone(),
        stores.intake.clone(),
        stores.sent.clone(),
    )
    .await;

    log::info!("Shutting down");
    cancellation_token.cancel();
    trigger_task.await?;
    sync_task.await?;

    Ok(())
}

#[cfg(test)]
mod tests;
