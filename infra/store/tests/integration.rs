use chrono::{Duration, Utc};
use densite_domain::{Locality, LocalityKind};
use densite_store::{JsonStore, LocalityStore, MemoryStore, StoreError};
use tempfile::TempDir;

fn sample(name: &str, population: u64, area: f64) -> Locality {
    Locality::new(name, population, area, LocalityKind::Urban).unwrap()
}

#[test]
fn memory_store_roundtrip() {
    let store = MemoryStore::new();
    store.insert(&sample("Grand Ville", 120_000, 48.0)).unwrap();
    store.insert(&sample("Petit Bourg", 3_000, 12.0)).unwrap();

    let all = store.fetch_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name(), "Grand Ville");
    assert_eq!(all[1].name(), "Petit Bourg");
}

#[test]
fn memory_store_rejects_duplicate_names_case_insensitively() {
    let store = MemoryStore::new();
    store.insert(&sample("Grand Ville", 120_000, 48.0)).unwrap();

    let err = store.insert(&sample("GRAND VILLE", 1, 1.0)).unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));
    assert_eq!(store.len(), 1);
}

#[test]
fn count_changed_since_is_strictly_greater() {
    let store = MemoryStore::new();
    let locality = sample("Ville", 10, 1.0);
    let registered = locality.registered_at();
    store.insert(&locality).unwrap();

    // the record's own timestamp is not "after" itself
    assert_eq!(store.count_changed_since(registered).unwrap(), 0);
    assert_eq!(store.count_changed_since(registered - Duration::seconds(1)).unwrap(), 1);
    assert_eq!(store.count_changed_since(Utc::now() + Duration::hours(1)).unwrap(), 0);
}

#[test]
fn json_store_persists_across_handles() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("localities.json");

    {
        let store = JsonStore::open(&path).unwrap();
        store.insert(&sample("Grand Ville", 120_000, 48.0)).unwrap();
        store.insert(&sample("Petit Bourg", 3_000, 12.0)).unwrap();
    }

    let reopened = JsonStore::open(&path).unwrap();
    let all = reopened.fetch_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name(), "Grand Ville");
    assert_eq!(all[0].population(), 120_000);
}

#[test]
fn json_store_empty_without_document() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::open(dir.path().join("missing.json")).unwrap();
    assert!(store.fetch_all().unwrap().is_empty());
    assert_eq!(store.count_changed_since(Utc::now()).unwrap(), 0);
}

#[test]
fn json_store_rejects_duplicates() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::open(dir.path().join("localities.json")).unwrap();
    store.insert(&sample("Ville", 10, 1.0)).unwrap();

    let err = store.insert(&sample("ville", 20, 2.0)).unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));
    assert_eq!(store.fetch_all().unwrap().len(), 1);
}

#[test]
fn json_store_skips_invalid_records_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("localities.json");

    // one valid record, one with a zero area that must not survive validation
    std::fs::write(
        &path,
        r#"[
            {"name":"Ville","population":10,"area":1.0,"kind":"URBAN","registered_at":"2024-03-01T12:00:00Z"},
            {"name":"Broken","population":10,"area":0.0,"kind":"RURAL","registered_at":"2024-03-01T12:00:00Z"}
        ]"#,
    )
    .unwrap();

    let store = JsonStore::open(&path).unwrap();
    let all = store.fetch_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name(), "Ville");
}

#[test]
fn json_store_surfaces_malformed_documents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("localities.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let store = JsonStore::open(&path).unwrap();
    let err = store.fetch_all().unwrap_err();
    assert!(matches!(err, StoreError::Serde { .. }));
}

#[test]
fn json_store_sweeps_stale_temp_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("localities.json");
    let stale = dir.path().join("localities.json.densitetmp.7");
    std::fs::write(&stale, b"garbage").unwrap();

    let _store = JsonStore::open(&path).unwrap();
    assert!(!stale.exists(), "stale temp file should be removed on open");
}
