use async_trait::async_trait;
use sipsweet_models::user::UserId;

use crate::message::HydrationMessage;

#[async_trait]
pub trait ReminderDeliveryChannel: Send + Sync + 'static {
    async fn send_reminder(&self, user_id: UserId, message: &HydrationMessage) -> anyhow::Result<()>;
}
