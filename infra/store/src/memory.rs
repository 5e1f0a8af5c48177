use crate::{LocalityStore, StoreError, name_taken};
use chrono::{DateTime, Utc};
use densite_domain::Locality;
use parking_lot::RwLock;

/// Process-local store backend.
///
/// Holds the records in an `RwLock`-guarded vector, insertion order preserved.
/// Useful for tests and sessions that do not need durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Locality>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl LocalityStore for MemoryStore {
    fn insert(&self, locality: &Locality) -> Result<(), StoreError> {
        let mut records = self.records.write();
        if name_taken(&records, locality.name()) {
            return Err(StoreError::Conflict {
                message: format!("a locality named {:?} already exists", locality.name()).into(),
                context: None,
            });
        }
        records.push(locality.clone());
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<Locality>, StoreError> {
        Ok(self.records.read().clone())
    }

    fn count_changed_since(&self, since: DateTime<Utc>) -> Result<u64, StoreError> {
        let count = self.records.read().iter().filter(|l| l.registered_at() > since).count();
        Ok(count as u64)
    }
}
