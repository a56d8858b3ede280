use async_trait::async_trait;
use sipsweet_models::user::UserId;
use sipsweet_scheduler::{ReminderDeliveryChannel, message::HydrationMessage};
use teloxide::prelude::*;

pub struct TelegramDeliveryChannel {
    bot: Bot,
}

impl TelegramDeliveryChannel {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ReminderDeliveryChannel for TelegramDeliveryChannel {
    async fn send_reminder(&self, user_id: UserId, message: &HydrationMessage) -> anyhow::Result<()> {
        self.bot
            .send_message(ChatId(user_id), format!("{}\n{}", message.title, message.body))
            .await?;

        Ok(())
    }
}
