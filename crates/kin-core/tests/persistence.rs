use std::time::Duration;

use kin_core::equality::shallow_sets_equal;
use kin_core::error::ErrorCode;
use kin_core::lock::{LockMode, StoreLock};
use kin_core::model::EntryStore;
use kin_core::persist::{ENTRIES_KEY, FileKv, KeyValueStore, PersistError, load, load_or_empty, save};
use tempfile::TempDir;

fn sample() -> EntryStore {
    let mut store = EntryStore::new();
    store.give("Ada").as_child("Byron").expect("link");
    store.give("Byron").as_parent("Clara").expect("link");
    store.give("Ada").as_parent("Dora").expect("link");
    store.get_or_create("Eve");
    store
}

#[test]
fn file_store_round_trip_is_set_equal() -> Result<(), PersistError> {
    let dir = TempDir::new().expect("tempdir");
    let mut kv = FileKv::new(dir.path().join("data"));

    let store = sample();
    save(&store, &mut kv)?;
    assert!(kv.value_path(ENTRIES_KEY).exists());

    let loaded = load(&kv)?;
    assert_eq!(loaded.len(), store.len());
    assert!(shallow_sets_equal(store.entries(), loaded.entries()));
    assert!(loaded.asymmetric_edges().is_empty());
    Ok(())
}

#[test]
fn reordered_snapshot_is_still_set_equal() -> Result<(), PersistError> {
    let dir = TempDir::new().expect("tempdir");
    let mut kv = FileKv::new(dir.path());

    let store = sample();
    let mut reversed = store.entries().to_vec();
    reversed.reverse();
    kv.set(ENTRIES_KEY, &serde_json::to_string(&reversed).expect("json"))?;

    let loaded = load(&kv)?;
    assert_ne!(loaded.entries(), store.entries());
    assert!(shallow_sets_equal(store.entries(), loaded.entries()));
    Ok(())
}

#[test]
fn missing_file_loads_empty() -> Result<(), PersistError> {
    let dir = TempDir::new().expect("tempdir");
    let kv = FileKv::new(dir.path());
    assert!(load(&kv)?.is_empty());
    Ok(())
}

#[test]
fn corrupted_file_is_reported_then_degraded() {
    let dir = TempDir::new().expect("tempdir");
    let kv = FileKv::new(dir.path());
    std::fs::write(kv.value_path(ENTRIES_KEY), "[{\"title\":").expect("write");

    let err = load(&kv).expect_err("truncated json");
    assert_eq!(err.code(), ErrorCode::MalformedSnapshot);
    assert!(load_or_empty(&kv).is_empty());
}

#[test]
fn entries_without_relation_lists_load_as_isolated() -> Result<(), PersistError> {
    let dir = TempDir::new().expect("tempdir");
    let mut kv = FileKv::new(dir.path());
    kv.set(ENTRIES_KEY, r#"[{"title":"lonely"}]"#)?;

    let loaded = load(&kv)?;
    assert!(loaded.get("lonely").expect("loaded").is_isolated());
    Ok(())
}

#[test]
fn held_write_lock_times_out_readers() {
    let dir = TempDir::new().expect("tempdir");
    let kv = FileKv::new(dir.path()).with_lock_timeout(Duration::from_millis(50));
    let _held = StoreLock::acquire(
        dir.path(),
        ENTRIES_KEY,
        LockMode::Exclusive,
        Duration::from_secs(1),
    )
    .expect("first lock");

    let err = load(&kv).expect_err("lock is held");
    assert_eq!(err.code(), ErrorCode::LockContention);
}
