//! Reminder evaluation for hydration reminders.
//!
//! Everything here except [`delivery`] is a pure function of a settings
//! snapshot, the logged intake and the instant passed in as `now`.

pub mod decision;
pub mod delivery;
pub mod dnd;
pub mod message;
pub mod next_eligible;
pub mod status;

pub use decision::{ReminderDecision, decide, evaluate, last_sip_today, reminder_anchor};
pub use delivery::ReminderDeliveryChannel;
pub use dnd::{is_in_dnd_window, should_send_notification};
pub use next_eligible::next_eligible_instant;

#[cfg(test)]
mod tests;
