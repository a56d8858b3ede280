use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{FlakyTier, utc};
use crate::{ConflictPolicy, InMemoryTier, StoreTier, SyncReport, Syncable, TieredStore};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Note {
    text: &'static str,
    updated_at: DateTime<Utc>,
}

impl Syncable for Note {
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn note(text: &'static str, hour: u32) -> Note {
    Note {
        text,
        updated_at: utc(2025, 6, 2, hour, 0),
    }
}

struct TestContext {
    local: Arc<InMemoryTier<u32, Note>>,
    remote: Arc<FlakyTier<u32, Note>>,
    store: TieredStore<u32, Note>,
}

impl TestContext {
    fn new(policy: ConflictPolicy) -> Self {
        let local = Arc::new(InMemoryTier::new());
        let remote = FlakyTier::new();
        let store = TieredStore::new(local.clone(), remote.clone(), policy);

        Self {
            local,
            remote,
            store,
        }
    }
}

#[tokio::test]
async fn put_writes_through_to_both_tiers() {
    let ctx = TestContext::new(ConflictPolicy::LastWriteWins);

    ctx.store.put(1, note("first", 9)).await.unwrap();

    assert_eq!(ctx.local.get(&1).await.unwrap(), Some(note("first", 9)));
    assert_eq!(ctx.remote.get(&1).await.unwrap(), Some(note("first", 9)));
    assert!(!ctx.store.has_pending_changes().await);
}

#[tokio::test]
async fn offline_put_keeps_local_change_and_syncs_later() {
    let ctx = TestContext::new(ConflictPolicy::LastWriteWins);
    ctx.remote.set_online(false);

    ctx.store.put(1, note("offline", 9)).await.unwrap();

    assert!(ctx.store.has_pending_changes().await);
    assert_eq!(ctx.store.get(&1).await.unwrap(), Some(note("offline", 9)));

    let report = ctx.store.try_sync().await.unwrap();
    assert_eq!(report, SyncReport { synced: 0, failed: 1 });

    ctx.remote.set_online(true);
    let report = ctx.store.try_sync().await.unwrap();

    assert_eq!(report, SyncReport { synced: 1, failed: 0 });
    assert!(!ctx.store.has_pending_changes().await);
    assert_eq!(ctx.remote.get(&1).await.unwrap(), Some(note("offline", 9)));
}

#[tokio::test]
async fn read_falls_back_to_local_copy_when_remote_is_down() {
    let ctx = TestContext::new(ConflictPolicy::LastWriteWins);
    ctx.store.put(1, note("cached", 9)).await.unwrap();

    ctx.remote.set_online(false);

    assert_eq!(ctx.store.get(&1).await.unwrap(), Some(note("cached", 9)));
    assert_eq!(ctx.store.get(&2).await.unwrap(), None);
}

#[tokio::test]
async fn read_through_caches_remote_value_locally() {
    let ctx = TestContext::new(ConflictPolicy::LastWriteWins);
    ctx.remote.put(1, note("remote", 9)).await.unwrap();

    assert_eq!(ctx.store.get(&1).await.unwrap(), Some(note("remote", 9)));
    assert_eq!(ctx.local.get(&1).await.unwrap(), Some(note("remote", 9)));
}

#[tokio::test]
async fn last_write_wins_picks_newer_copy() {
    let ctx = TestContext::new(ConflictPolicy::LastWriteWins);
    ctx.local.put(1, note("old local", 8)).await.unwrap();
    ctx.remote.put(1, note("new remote", 10)).await.unwrap();

    assert_eq!(ctx.store.get(&1).await.unwrap(), Some(note("new remote", 10)));

    ctx.local.put(2, note("new local", 11)).await.unwrap();
    ctx.remote.put(2, note("old remote", 7)).await.unwrap();

    assert_eq!(ctx.store.get(&2).await.unwrap(), Some(note("new local", 11)));
}

#[tokio::test]
async fn explicit_preference_ignores_timestamps() {
    let ctx = TestContext::new(ConflictPolicy::PreferLocal);
    ctx.local.put(1, note("local", 8)).await.unwrap();
    ctx.remote.put(1, note("remote", 10)).await.unwrap();

    assert_eq!(ctx.store.get(&1).await.unwrap(), Some(note("local", 8)));

    let ctx = TestContext::new(ConflictPolicy::PreferRemote);
    ctx.local.put(1, note("local", 10)).await.unwrap();
    ctx.remote.put(1, note("remote", 8)).await.unwrap();

    assert_eq!(ctx.store.get(&1).await.unwrap(), Some(note("remote", 8)));
}

#[tokio::test]
async fn sync_resolves_against_newer_remote_copy() {
    let ctx = TestContext::new(ConflictPolicy::LastWriteWins);
    ctx.remote.set_online(false);
    ctx.store.put(1, note("stale offline edit", 8)).await.unwrap();

    ctx.remote.set_online(true);
    ctx.remote.put(1, note("newer elsewhere", 10)).await.unwrap();
    ctx.store.try_sync().await.unwrap();

    assert_eq!(ctx.local.get(&1).await.unwrap(), Some(note("newer elsewhere", 10)));
    assert_eq!(ctx.remote.get(&1).await.unwrap(), Some(note("newer elsewhere", 10)));
}

#[tokio::test]
async fn keys_are_collected_from_both_tiers() {
    let ctx = TestContext::new(ConflictPolicy::LastWriteWins);
    ctx.local.put(1, note("local", 8)).await.unwrap();
    ctx.remote.put(2, note("remote", 8)).await.unwrap();

    let mut keys = ctx.store.keys().await.unwrap();
    keys.sort();
    assert_eq!(keys, vec![1, 2]);

    ctx.remote.set_online(false);
    assert_eq!(ctx.store.keys().await.unwrap(), vec![1]);
}
