use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use sipsweet_models::user::UserId;
use sipsweet_scheduler::{
    ReminderDeliveryChannel, decide, message::random_message, reminder_anchor,
};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::storage::Stores;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Sent,
    NotDue { next: DateTime<Utc> },
    BlockedByDnd { next: DateTime<Utc> },
    DeliveryFailed,
}

/// Evaluates users on demand and dispatches the reminders that are due.
pub struct ReminderTrigger {
    stores: Stores,
    delivery_channel: Arc<dyn ReminderDeliveryChannel>,
    // Serializes evaluate-send-record so overlapping triggers see each other's sends.
    dispatch_lock: Mutex<()>,
}

impl ReminderTrigger {
    pub fn new(stores: Stores, delivery_channel: Arc<dyn ReminderDeliveryChannel>) -> Self {
        Self {
            stores,
            delivery_channel,
            dispatch_lock: Mutex::new(()),
        }
    }

    pub async fn check_user(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> anyhow::Result<TriggerOutcome> {
        let _guard = self.dispatch_lock.lock().await;

        let settings = self.stores.settings.load(user_id).await?;
        let local_now = now.with_timezone(&settings.timezone);
        let events = self
            .stores
            .intake
            .events_on(user_id, local_now.date_naive())
            .await?;

        let last_sent = self.stores.sent.last_sent(user_id).await?;
        let anchor = reminder_anchor(&events, last_sent, &local_now);
        let decision = decide(&settings.reminder, anchor, &local_now);

        log::debug!(
            "Evaluated reminder. [user = {user_id}, anchor = {anchor:?}, decision = {decision:?}]"
        );

        if !decision.should_send {
            let next = decision.next_eligible_instant;
            return Ok(if decision.blocked_by_dnd {
                TriggerOutcome::BlockedByDnd { next }
            } else {
                TriggerOutcome::NotDue { next }
            });
        }

        let message = random_message(settings.nickname, settings.flower);
        if let Err(err) = self
            .delivery_channel
            .send_reminder(user_id, &message)
            .await
        {
            log::warn!("Failed to deliver reminder. [user = {user_id}, error = {err:#}]");
            return Ok(TriggerOutcome::DeliveryFailed);
        }

        self.stores.sent.record(user_id, now).await?;
        log::info!("Sent hydration reminder to user {user_id}");

        Ok(TriggerOutcome::Sent)
    }

    /// Checks every known user. A failure for one user does not stop the rest.
    pub async fn check_all(&self, now: DateTime<Utc>) -> Vec<(UserId, TriggerOutcome)> {
        let users = match self.stores.settings.users().await {
            Ok(users) => users,
            Err(err) => {
                log::warn!("Failed to list users. [error = {err}]");
                return Vec::new();
            }
        };

        let mut outcomes = Vec::with_capacity(users.len());
        for user_id in users {
            match self.check_user(user_id, now).await {
                Ok(outcome) => outcomes.push((user_id, outcome)),
                Err(err) => log::warn!("Failed to check user. [user = {user_id}, error = {err:#}]"),
            }
        }

        outcomes
    }

    pub async fn run(&self, period: Duration, cancellation_token: CancellationToken) {
        log::info!("Starting reminder trigger, checking every {period:?}");
        let mut interval = tokio::time::interval(period);

        loop {
            tokio::select! {
                _ = cancellation_token.cancelled() => {
                    log::info!("Reminder trigger stopped");
                    break;
                }
                _ = interval.tick() => {
                    let outcomes = self.check_all(Utc::now()).await;
                    let sent = outcomes
                        .iter()
                        .filter(|(_, outcome)| *outcome == TriggerOutcome::Sent)
                        .count();
                    log::debug!("Checked {} users, sent {sent} reminders", outcomes.len());
                }
            }
        }
    }
}
