//! Locality registry feature slice.
//!
//! The [`Registry`] owns the authoritative in-process view of localities: a
//! mirror of the storage collaborator, insertion order preserved, guarded by a
//! single mutex so a caller-driven `add` and a watcher-driven full refresh can
//! never interleave into a torn state. Readers take a consistent snapshot
//! under the lock and scan their private copy outside it.

mod error;

pub use error::{RegistryError, RegistryErrorExt};

use densite_domain::{DensityStats, Locality, LocalityKind};
use densite_store::LocalityStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Authoritative in-process locality collection.
#[derive(Debug)]
pub struct Registry {
    store: Arc<dyn LocalityStore>,
    mirror: Mutex<Vec<Locality>>,
}

impl Registry {
    /// Creates a registry over the given storage collaborator with an empty
    /// mirror. Call [`Registry::load`] to fill it from the store.
    #[must_use]
    pub fn new(store: Arc<dyn LocalityStore>) -> Self {
        Self { store, mirror: Mutex::new(Vec::new()) }
    }

    /// Fills the mirror from the store, replacing whatever it held.
    ///
    /// # Errors
    /// Returns [`RegistryError::Store`] if the store cannot be read.
    pub fn load(&self) -> Result<usize, RegistryError> {
        let localities = self.store.fetch_all().context("Initial registry load")?;
        let count = localities.len();
        *self.mirror.lock() = localities;
        info!(count, "Registry loaded from store");
        Ok(count)
    }

    /// Registers a new locality.
    ///
    /// The duplicate check runs before any persistence attempt, so a rejected
    /// name never reaches the store. On success the record is persisted first
    /// and appended to the mirror only after the store confirms the write; a
    /// failed write leaves the mirror untouched. The whole sequence holds the
    /// mirror lock, serializing concurrent adds of the same name.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateName`] for a name collision, or
    /// [`RegistryError::Store`] when persistence fails.
    pub fn add(&self, locality: Locality) -> Result<(), RegistryError> {
        let mut mirror = self.mirror.lock();

        let lowered = locality.name().to_lowercase();
        if mirror.iter().any(|l| l.name().to_lowercase() == lowered) {
            return Err(RegistryError::DuplicateName {
                message: format!("a locality named {:?} already exists", locality.name()).into(),
                context: None,
            });
        }

        self.store.insert(&locality).context("Persisting new locality")?;
        debug!(name = locality.name(), "Locality registered");
        mirror.push(locality);
        Ok(())
    }

    /// Case-insensitive substring search over locality names.
    ///
    /// A blank query returns every locality in insertion order. The result is
    /// a fresh copy: later registry mutations are never visible through it.
    #[must_use]
    pub fn search_by_name(&self, query: &str) -> Vec<Locality> {
        let snapshot = self.snapshot();

        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return snapshot;
        }

        snapshot.into_iter().filter(|l| l.name().to_lowercase().contains(&query)).collect()
    }

    /// Density statistics per locality kind over the current mirror.
    ///
    /// Kinds with no members are absent from the map.
    #[must_use]
    pub fn aggregate_by_kind(&self) -> HashMap<LocalityKind, DensityStats> {
        let snapshot = self.snapshot();

        let mut densities: HashMap<LocalityKind, Vec<f64>> = HashMap::new();
        for locality in &snapshot {
            densities.entry(locality.kind()).or_default().push(locality.density());
        }

        densities
            .into_iter()
            .filter_map(|(kind, values)| {
                DensityStats::from_densities(values).map(|stats| (kind, stats))
            })
            .collect()
    }

    /// Consistent copy of the mirror, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Locality> {
        self.mirror.lock().clone()
    }

    /// Replaces the mirror wholesale. This is the watcher-driven refresh path
    /// for changes made to the store by another writer.
    pub fn replace_all(&self, localities: Vec<Locality>) {
        let count = localities.len();
        *self.mirror.lock() = localities;
        debug!(count, "Registry mirror refreshed");
    }

    /// Number of localities currently mirrored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mirror.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mirror.lock().is_empty()
    }
}
