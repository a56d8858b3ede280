pub mod error;
pub mod format;
pub mod intake;
pub mod progress;
pub mod settings;
pub mod theme;
pub mod time_of_day;
pub mod user;

pub use chrono;
pub use chrono_tz;

#[cfg(test)]
mod tests;
