use thiserror::Error;

use crate::intake::MAX_SIP_ML;
use crate::settings::{
    MAX_DAILY_GOAL_ML, MAX_INTERVAL_MINUTES, MIN_DAILY_GOAL_ML, MIN_INTERVAL_MINUTES,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "Reminder interval must be between {min} and {max} minutes, got {0}",
        min = MIN_INTERVAL_MINUTES,
        max = MAX_INTERVAL_MINUTES
    )]
    IntervalOutOfRange(u32),

    #[error(
        "Daily goal must be between {min} and {max} ml, got {0}",
        min = MIN_DAILY_GOAL_ML,
        max = MAX_DAILY_GOAL_ML
    )]
    GoalOutOfRange(u32),

    #[error("Sip amount must be between 1 and {max} ml, got {0}", max = MAX_SIP_ML)]
    AmountOutOfRange(u32),
}
