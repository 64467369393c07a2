#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveDateTime};
use resalle::{
    model::{Reservation, ReservationId, RoomId},
    storage::{JsonStore, MemoryStore, ReservationStore, StorageError},
};
use tempfile::tempdir;

fn at(d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn reservation(room: &str, d: u32, h: u32) -> Reservation {
    Reservation::new(
        RoomId::new(room),
        "Alice",
        at(d, h),
        2.0,
        Some("Atelier".to_string()),
    )
    .unwrap()
}

#[test]
fn json_store_roundtrip_preserves_records_and_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reservations.json");

    let originals = vec![
        reservation("CL-101", 20, 8),
        reservation("CONF-1", 20, 10),
        reservation("CL-101", 21, 14),
    ];
    {
        let store = JsonStore::open(&path).unwrap();
        for r in &originals {
            store.insert(r).unwrap();
        }
    }

    // réouverture : mêmes enregistrements, mêmes champs, même ordre
    let reopened = JsonStore::open(&path).unwrap();
    assert_eq!(reopened.list_all().unwrap(), originals);
}

#[test]
fn absent_file_is_an_empty_store() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open(dir.path().join("missing.json")).unwrap();
    assert!(store.list_all().unwrap().is_empty());
    assert!(store
        .find_by_id(&ReservationId::new("RES-DEADBEEF"))
        .unwrap()
        .is_none());
}

#[test]
fn list_all_is_idempotent() {
    let store = MemoryStore::new();
    store.insert(&reservation("CL-101", 20, 8)).unwrap();
    store.insert(&reservation("CL-101", 20, 11)).unwrap();
    assert_eq!(store.list_all().unwrap(), store.list_all().unwrap());
}

#[test]
fn delete_reports_presence() {
    let store = MemoryStore::new();
    let r = reservation("CL-101", 20, 8);
    store.insert(&r).unwrap();

    assert!(store.delete_by_id(&r.id).unwrap());
    assert!(!store.delete_by_id(&r.id).unwrap());
    assert!(store.find_by_id(&r.id).unwrap().is_none());
}

#[test]
fn find_by_room_filters() {
    let store = MemoryStore::new();
    let a = reservation("CL-101", 20, 8);
    let b = reservation("CONF-1", 20, 8);
    store.insert(&a).unwrap();
    store.insert(&b).unwrap();

    let found = store.find_by_room(&RoomId::new("CL-101")).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, a.id);
}

#[test]
fn insert_with_same_id_replaces() {
    let store = MemoryStore::new();
    let mut r = reservation("CL-101", 20, 8);
    store.insert(&r).unwrap();
    r.requester = "Bob".to_string();
    store.insert(&r).unwrap();

    let all = store.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].requester, "Bob");
}

#[test]
fn corrupt_file_surfaces_as_storage_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reservations.json");
    std::fs::write(&path, "pas du json").unwrap();

    let store = JsonStore::open(&path).unwrap();
    let err = store.list_all().unwrap_err();
    assert!(matches!(err, StorageError::Corrupt(_)));
}

#[test]
fn json_delete_persists_to_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reservations.json");
    let r = reservation("CL-101", 20, 8);
    {
        let store = JsonStore::open(&path).unwrap();
        store.insert(&r).unwrap();
        assert!(store.delete_by_id(&r.id).unwrap());
    }
    let reopened = JsonStore::open(&path).unwrap();
    assert!(reopened.list_all().unwrap().is_empty());
}
