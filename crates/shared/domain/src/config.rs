use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level application configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub store: StoreConfig,
    pub watcher: WatcherConfig,
    pub report: ReportDefaults,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Storage collaborator configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backing document for the embedded JSON store.
    pub path: PathBuf,
}

/// Change-polling configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Seconds between two poll ticks.
    pub interval_secs: u64,
    /// How long `stop()` waits for an in-flight tick before forcing termination.
    pub stop_grace_secs: u64,
}

/// Report generation defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportDefaults {
    /// Directory report files are written into when the caller gives a bare
    /// file name.
    pub output_dir: PathBuf,
}

// --- Default ---

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("densite.json") }
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self { interval_secs: 5, stop_grace_secs: 10 }
    }
}

impl Default for ReportDefaults {
    fn default() -> Self {
        Self { output_dir: PathBuf::from("reports") }
    }
}
