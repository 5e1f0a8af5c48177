use crate::error::AppError;
use densite_domain::{Locality, config::AppConfig};
use densite_registry::Registry;
use densite_store::{JsonStore, LocalityStore};
use densite_watcher::ChangeWatcher;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Composed application services: the durable store, its in-memory mirror
/// and the background change watcher.
///
/// The watcher's first subscriber refreshes the mirror, so once
/// [`ChangeWatcher::start`] is called the registry tracks out-of-band store
/// changes on its own.
#[derive(Debug)]
pub struct App {
    config: AppConfig,
    registry: Arc<Registry>,
    watcher: ChangeWatcher,
}

impl App {
    /// Opens the store, fills the registry mirror and wires the watcher.
    /// The watcher is created stopped; call [`ChangeWatcher::start`] on
    /// [`App::watcher`] to begin polling.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] when the backing document cannot be
    /// opened and [`AppError::Registry`] when the initial load fails.
    pub fn init(config: AppConfig) -> Result<Self, AppError> {
        let store: Arc<dyn LocalityStore> = Arc::new(JsonStore::open(&config.store.path)?);
        debug!(path = %config.store.path.display(), "store opened");

        let registry = Arc::new(Registry::new(Arc::clone(&store)));
        let loaded = registry.load()?;
        info!(localities = loaded, "registry mirror filled");

        let watcher = ChangeWatcher::with_timing(
            store,
            Duration::from_secs(config.watcher.interval_secs),
            Duration::from_secs(config.watcher.stop_grace_secs),
        );
        let mirror = Arc::clone(&registry);
        watcher.subscribe(move |snapshot: &[Locality]| {
            mirror.replace_all(snapshot.to_vec());
            Ok(())
        });

        Ok(Self { config, registry, watcher })
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    #[must_use]
    pub const fn watcher(&self) -> &ChangeWatcher {
        &self.watcher
    }
}
