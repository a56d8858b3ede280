use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MAX_SIP_ML: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntakeEvent {
    pub amount_ml: u32,
    pub timestamp: DateTime<Utc>,
}

impl IntakeEvent {
    pub fn new(amount_ml: u32, timestamp: DateTime<Utc>) -> Result<Self, ValidationError> {
        if amount_ml == 0 || amount_ml > MAX_SIP_ML {
            return Err(ValidationError::AmountOutOfRange(amount_ml));
        }

        Ok(Self {
            amount_ml,
            timestamp,
        })
    }

    /// Calendar date of the event as seen in `tz`.
    pub fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.timestamp.with_timezone(tz).date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SipSize {
    Small,
    Regular,
    BigGulp,
}

impl SipSize {
    pub const ALL: [SipSize; 3] = [SipSize::Small, SipSize::Regular, SipSize::BigGulp];

    pub fn amount_ml(&self) -> u32 {
        match self {
            SipSize::Small => 150,
            SipSize::Regular => 250,
            SipSize::BigGulp => 400,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SipSize::Small => "Small Sip",
            SipSize::Regular => "Regular Sip",
            SipSize::BigGulp => "Big Gulp",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SipSize::Small => "💧",
            SipSize::Regular => "🥤",
            SipSize::BigGulp => "🚰",
        }
    }
}
