use densite_domain::config::{AppConfig, ReportDefaults, StoreConfig, WatcherConfig};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn config_defaults_are_sane() {
    let store = StoreConfig::default();
    assert_eq!(store.path, PathBuf::from("densite.json"));

    let watcher = WatcherConfig::default();
    assert_eq!(watcher.interval_secs, 5);
    assert_eq!(watcher.stop_grace_secs, 10);

    let report = ReportDefaults::default();
    assert_eq!(report.output_dir, PathBuf::from("reports"));
}

#[test]
fn app_config_deserializes() {
    let raw = json!({
        "store": { "path": "/var/lib/densite/localities.json" },
        "watcher": { "interval_secs": 1 },
        "report": { "output_dir": "/tmp/reports" }
    });

    let cfg: AppConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.store.path, PathBuf::from("/var/lib/densite/localities.json"));
    assert_eq!(cfg.watcher.interval_secs, 1);
    // omitted field falls back to its default
    assert_eq!(cfg.watcher.stop_grace_secs, 10);
    assert_eq!(cfg.report.output_dir, PathBuf::from("/tmp/reports"));
}
