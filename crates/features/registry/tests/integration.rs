use chrono::{DateTime, Utc};
use densite_domain::{Locality, LocalityKind};
use densite_registry::{Registry, RegistryError};
use densite_store::{LocalityStore, MemoryStore, StoreError};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn urban(name: &str, population: u64, area: f64) -> Locality {
    Locality::new(name, population, area, LocalityKind::Urban).unwrap()
}

fn rural(name: &str, population: u64, area: f64) -> Locality {
    Locality::new(name, population, area, LocalityKind::Rural).unwrap()
}

/// Store double that counts insert attempts and can be switched to fail them.
#[derive(Debug, Default)]
struct ProbeStore {
    inner: MemoryStore,
    inserts: AtomicUsize,
    fail_inserts: bool,
}

impl LocalityStore for ProbeStore {
    fn insert(&self, locality: &Locality) -> Result<(), StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts {
            return Err(StoreError::Backend { message: "store offline".into(), context: None });
        }
        self.inner.insert(locality)
    }

    fn fetch_all(&self) -> Result<Vec<Locality>, StoreError> {
        self.inner.fetch_all()
    }

    fn count_changed_since(&self, since: DateTime<Utc>) -> Result<u64, StoreError> {
        self.inner.count_changed_since(since)
    }
}

#[test]
fn add_persists_then_mirrors() {
    let store = Arc::new(MemoryStore::new());
    let registry = Registry::new(store.clone());

    registry.add(urban("Grand Ville", 120_000, 48.0)).unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn duplicate_add_never_reaches_the_store() {
    let store = Arc::new(ProbeStore::default());
    let registry = Registry::new(store.clone());

    registry.add(urban("Grand Ville", 120_000, 48.0)).unwrap();
    let err = registry.add(rural("grand VILLE", 5, 1.0)).unwrap_err();

    assert!(matches!(err, RegistryError::DuplicateName { .. }));
    assert_eq!(store.inserts.load(Ordering::SeqCst), 1, "only the first add may hit the store");
    assert_eq!(registry.len(), 1);
}

#[test]
fn failed_persistence_leaves_mirror_unchanged() {
    let store = Arc::new(ProbeStore { fail_inserts: true, ..Default::default() });
    let registry = Registry::new(store);

    let err = registry.add(urban("Ville", 10, 1.0)).unwrap_err();
    assert!(matches!(err, RegistryError::Store { .. }));
    assert!(registry.is_empty());
}

#[test]
fn blank_search_returns_everything_in_insertion_order() {
    let registry = Registry::new(Arc::new(MemoryStore::new()));
    registry.add(urban("Grand Ville", 120_000, 48.0)).unwrap();
    registry.add(rural("Petit Bourg", 3_000, 12.0)).unwrap();

    for query in ["", "   "] {
        let found = registry.search_by_name(query);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name(), "Grand Ville");
        assert_eq!(found[1].name(), "Petit Bourg");
    }
}

#[test]
fn search_is_case_insensitive_substring() {
    let registry = Registry::new(Arc::new(MemoryStore::new()));
    registry.add(urban("Grand Ville", 120_000, 48.0)).unwrap();
    registry.add(rural("Petit Bourg", 3_000, 12.0)).unwrap();

    let found = registry.search_by_name("viLLe");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), "Grand Ville");

    assert!(registry.search_by_name("nowhere").is_empty());
}

#[test]
fn search_results_are_detached_copies() {
    let registry = Registry::new(Arc::new(MemoryStore::new()));
    registry.add(urban("Grand Ville", 120_000, 48.0)).unwrap();

    let before = registry.search_by_name("");
    registry.add(rural("Petit Bourg", 3_000, 12.0)).unwrap();

    assert_eq!(before.len(), 1, "earlier result must not observe later adds");
}

#[test]
fn aggregate_by_kind_summarizes_density() {
    let registry = Registry::new(Arc::new(MemoryStore::new()));
    // densities 10, 20, 30
    registry.add(urban("A", 100, 10.0)).unwrap();
    registry.add(urban("B", 200, 10.0)).unwrap();
    registry.add(urban("C", 300, 10.0)).unwrap();

    let aggregates = registry.aggregate_by_kind();
    let stats = aggregates.get(&LocalityKind::Urban).expect("urban stats");
    assert_eq!(stats.count, 3);
    assert!((stats.average - 20.0).abs() < f64::EPSILON);
    assert!((stats.min - 10.0).abs() < f64::EPSILON);
    assert!((stats.max - 30.0).abs() < f64::EPSILON);

    assert!(
        !aggregates.contains_key(&LocalityKind::Rural),
        "empty kinds must be absent, not zero-filled"
    );
}

#[test]
fn replace_all_swaps_the_mirror() {
    let registry = Registry::new(Arc::new(MemoryStore::new()));
    registry.add(urban("Old", 10, 1.0)).unwrap();

    registry.replace_all(vec![rural("New", 20, 2.0)]);

    let snapshot = registry.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name(), "New");
}

#[test]
fn load_fills_mirror_from_store() {
    let store = Arc::new(MemoryStore::new());
    store.insert(&urban("Seeded", 10, 1.0)).unwrap();

    let registry = Registry::new(store);
    assert_eq!(registry.load().unwrap(), 1);
    assert_eq!(registry.snapshot()[0].name(), "Seeded");
}
