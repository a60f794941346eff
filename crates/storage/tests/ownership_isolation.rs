#![forbid(unsafe_code)]

use std::path::PathBuf;
use td_core::ids::OwnerId;
use td_storage::{SqliteStore, StoreError, TabCreateRequest, TabRow};

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("td_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn create(store: &mut SqliteStore, owner: &OwnerId, title: &str, after: Option<&str>) -> TabRow {
    store
        .tab_create(
            owner,
            TabCreateRequest {
                title: title.to_string(),
                kind: "note".to_string(),
                payload: None,
                after_id: after.map(|id| id.to_string()),
            },
        )
        .expect("create tab")
}

#[test]
fn partitions_do_not_share_tabs() {
    let mut store = SqliteStore::open(temp_dir("partitions_disjoint")).expect("open store");
    let alice = OwnerId::try_new("alice").expect("owner id");
    let bob = OwnerId::try_new("bob").expect("owner id");

    let a1 = create(&mut store, &alice, "A1", None);
    let a2 = create(&mut store, &alice, "A2", Some(&a1.id));
    let b1 = create(&mut store, &bob, "B1", None);

    let alice_tabs = store.tab_list(&alice).expect("list alice");
    assert_eq!(alice_tabs.len(), 2);
    let bob_tabs = store.tab_list(&bob).expect("list bob");
    assert_eq!(bob_tabs.len(), 1);
    assert_eq!(bob_tabs[0].id, b1.id);

    assert_eq!(store.tab_get(&bob, &a2.id).expect("get"), None);
}

#[test]
fn counters_are_scoped_per_partition() {
    let mut store = SqliteStore::open(temp_dir("counters_scoped")).expect("open store");
    let alice = OwnerId::try_new("alice").expect("owner id");
    let bob = OwnerId::try_new("bob").expect("owner id");

    let a1 = create(&mut store, &alice, "A1", None);
    let b1 = create(&mut store, &bob, "B1", None);

    // Ids only need to be unique within (owner, id); both partitions start
    // their sequence independently.
    assert_eq!(a1.id, b1.id);
}

#[test]
fn cross_owner_predecessor_is_rejected_on_create() {
    let mut store = SqliteStore::open(temp_dir("cross_owner_create")).expect("open store");
    let alice = OwnerId::try_new("alice").expect("owner id");
    let bob = OwnerId::try_new("bob").expect("owner id");

    let a1 = create(&mut store, &alice, "A1", None);
    create(&mut store, &bob, "B1", None);
    let b2 = create(&mut store, &bob, "B2", Some("TAB-001"));
    // "TAB-001" resolved inside bob's partition, not alice's.
    assert_eq!(b2.predecessor_id.as_deref(), Some("TAB-001"));

    let err = store
        .tab_create(
            &bob,
            TabCreateRequest {
                title: "B3".to_string(),
                kind: "note".to_string(),
                payload: None,
                after_id: Some(format!("{}-foreign", a1.id)),
            },
        )
        .expect_err("foreign anchor");
    assert!(matches!(err, StoreError::InvalidPredecessor { .. }), "got {err:?}");
}

#[test]
fn cross_owner_relocate_and_delete_are_rejected() {
    let mut store = SqliteStore::open(temp_dir("cross_owner_mutate")).expect("open store");
    let alice = OwnerId::try_new("alice").expect("owner id");
    let bob = OwnerId::try_new("bob").expect("owner id");

    let a1 = create(&mut store, &alice, "A1", None);
    let a2 = create(&mut store, &alice, "A2", Some(&a1.id));
    // bob's partition stays empty.

    let err = store
        .tab_relocate(&bob, &a2.id, None)
        .expect_err("foreign relocate target");
    assert!(matches!(err, StoreError::TabNotFound { .. }), "got {err:?}");

    let err = store
        .tab_delete(&bob, &a1.id)
        .expect_err("foreign delete target");
    assert!(matches!(err, StoreError::TabNotFound { .. }), "got {err:?}");

    let err = store
        .tab_activate(&bob, &a1.id)
        .expect_err("foreign activate target");
    assert!(matches!(err, StoreError::TabNotFound { .. }), "got {err:?}");

    assert_eq!(store.tab_list(&alice).expect("list").len(), 2);
}

#[test]
fn activation_is_independent_across_partitions() {
    let mut store = SqliteStore::open(temp_dir("activation_independent")).expect("open store");
    let alice = OwnerId::try_new("alice").expect("owner id");
    let bob = OwnerId::try_new("bob").expect("owner id");

    let a1 = create(&mut store, &alice, "A1", None);
    let b1 = create(&mut store, &bob, "B1", None);

    store.tab_activate(&alice, &a1.id).expect("activate alice");
    store.tab_activate(&bob, &b1.id).expect("activate bob");

    assert_eq!(
        store.tab_active(&alice).expect("active").map(|row| row.id),
        Some(a1.id)
    );
    assert_eq!(
        store.tab_active(&bob).expect("active").map(|row| row.id),
        Some(b1.id.clone())
    );

    store.tab_deactivate_all(&alice).expect("deactivate alice");
    assert_eq!(store.tab_active(&alice).expect("active"), None);
    assert_eq!(
        store.tab_active(&bob).expect("active").map(|row| row.id),
        Some(b1.id)
    );
}
