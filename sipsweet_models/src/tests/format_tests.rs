use chrono::Utc;

use crate::{
    error::ValidationError,
    format::{format_interval, format_percentage, format_volume},
    intake::IntakeEvent,
    theme::FlowerType,
};

#[test]
fn volume_switches_to_liters_at_one_liter() {
    assert_eq!(format_volume(250), "250ml");
    assert_eq!(format_volume(999), "999ml");
    assert_eq!(format_volume(1000), "1.0L");
    assert_eq!(format_volume(1500), "1.5L");
}

#[test]
fn percentage_is_rounded() {
    assert_eq!(format_percentage(32.5), "33%");
    assert_eq!(format_percentage(99.4), "99%");
}

#[test]
fn interval_is_rendered_in_hours_and_minutes() {
    assert_eq!(format_interval(45), "45m");
    assert_eq!(format_interval(120), "2h");
    assert_eq!(format_interval(90), "1h 30m");
}

#[test]
fn sip_amount_must_be_positive_and_bounded() {
    let now = Utc::now();

    assert!(IntakeEvent::new(1, now).is_ok());
    assert!(IntakeEvent::new(2000, now).is_ok());
    assert_eq!(
        IntakeEvent::new(0, now),
        Err(ValidationError::AmountOutOfRange(0))
    );
    assert_eq!(
        IntakeEvent::new(2001, now),
        Err(ValidationError::AmountOutOfRange(2001))
    );
}

#[test]
fn flower_petals() {
    let petals: Vec<u32> = FlowerType::ALL.iter().map(FlowerType::petals).collect();

    assert_eq!(petals, vec![8, 6, 12]);
}
