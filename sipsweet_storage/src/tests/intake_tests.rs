use std::sync::Arc;

use chrono::NaiveDate;
use sipsweet_models::intake::IntakeEvent;

use super::{FlakyTier, utc};
use crate::{
    ConflictPolicy, DayLog, InMemoryTier, IntakeKey, IntakeLog, StoreTier, Syncable, TieredStore,
};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

fn sip(amount_ml: u32, hour: u32, minute: u32) -> IntakeEvent {
    IntakeEvent::new(amount_ml, utc(2025, 6, 2, hour, minute)).unwrap()
}

fn intake_log(policy: ConflictPolicy) -> (IntakeLog, Arc<FlakyTier<IntakeKey, DayLog>>) {
    let remote = FlakyTier::new();
    let store = TieredStore::new(Arc::new(InMemoryTier::new()), remote.clone(), policy);

    (IntakeLog::new(Arc::new(store)), remote)
}

#[tokio::test]
async fn appended_events_are_kept_in_chronological_order() {
    let (intake, _) = intake_log(ConflictPolicy::Merge);

    intake.append(1, date(2), sip(250, 12, 0)).await.unwrap();
    intake.append(1, date(2), sip(150, 9, 0)).await.unwrap();
    intake.append(1, date(2), sip(400, 15, 0)).await.unwrap();

    let amounts: Vec<u32> = intake
        .events_on(1, date(2))
        .await
        .unwrap()
        .iter()
        .map(|event| event.amount_ml)
        .collect();

    assert_eq!(amounts, vec![150, 250, 400]);
}

#[tokio::test]
async fn logs_are_separated_by_user_and_date() {
    let (intake, _) = intake_log(ConflictPolicy::Merge);

    intake.append(1, date(2), sip(250, 12, 0)).await.unwrap();
    intake.append(2, date(2), sip(150, 12, 0)).await.unwrap();
    intake.append(1, date(3), sip(400, 12, 0)).await.unwrap();

    assert_eq!(intake.events_on(1, date(2)).await.unwrap().len(), 1);
    assert_eq!(intake.events_on(2, date(2)).await.unwrap().len(), 1);
    assert!(intake.events_on(1, date(4)).await.unwrap().is_empty());
    assert_eq!(intake.events_between(1, date(1), date(7)).await.unwrap().len(), 2);
}

#[tokio::test]
async fn merge_unions_sips_logged_on_different_devices() {
    let (intake, remote) = intake_log(ConflictPolicy::Merge);
    intake.append(1, date(2), sip(250, 9, 0)).await.unwrap();

    remote.set_online(false);
    intake.append(1, date(2), sip(150, 11, 0)).await.unwrap();

    // Another device logged a sip while this one was offline.
    remote.set_online(true);
    let remote_copy = DayLog {
        events: vec![sip(250, 9, 0), sip(400, 10, 0)],
        updated_at: utc(2025, 6, 2, 10, 0),
    };
    remote.put((1, date(2)), remote_copy).await.unwrap();

    intake.try_sync().await.unwrap();

    let amounts: Vec<u32> = intake
        .events_on(1, date(2))
        .await
        .unwrap()
        .iter()
        .map(|event| event.amount_ml)
        .collect();
    assert_eq!(amounts, vec![250, 400, 150]);
}

#[test]
fn merge_is_duplicate_free() {
    let a = DayLog {
        events: vec![sip(250, 9, 0), sip(150, 11, 0)],
        updated_at: utc(2025, 6, 2, 11, 0),
    };
    let b = DayLog {
        events: vec![sip(250, 9, 0)],
        updated_at: utc(2025, 6, 2, 9, 0),
    };

    let merged = DayLog::merge(a, b);

    assert_eq!(merged.events.len(), 2);
    assert_eq!(merged.updated_at, utc(2025, 6, 2, 11, 0));
}
