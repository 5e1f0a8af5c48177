use densite::{App, AppConfig, Locality, LocalityKind};
use densite_store::{JsonStore, LocalityStore};
use std::time::Duration;

fn config_for(path: &std::path::Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.store.path = path.to_path_buf();
    config
}

#[test]
fn init_loads_existing_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("densite.json");

    let first = App::init(config_for(&path)).unwrap();
    first
        .registry()
        .add(Locality::new("Grand Ville", 500, 10.0, LocalityKind::Urban).unwrap())
        .unwrap();
    first
        .registry()
        .add(Locality::new("Petit Bourg", 100, 10.0, LocalityKind::Rural).unwrap())
        .unwrap();
    drop(first);

    let second = App::init(config_for(&path)).unwrap();
    assert_eq!(second.registry().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn watcher_refreshes_mirror_on_external_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("densite.json");

    let app = App::init(config_for(&path)).unwrap();
    assert!(app.registry().is_empty());

    // Write through a second store handle, as another process would.
    let external = JsonStore::open(&path).unwrap();
    external.insert(&Locality::new("Val Moyen", 300, 10.0, LocalityKind::Rural).unwrap()).unwrap();

    app.watcher().start().unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(app.registry().len(), 1);
    app.watcher().stop().await;
}
