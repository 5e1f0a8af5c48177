//! # Locality storage collaborator
//!
//! The [`LocalityStore`] trait is the narrow contract the registry and the
//! change watcher consume: insert one record, fetch everything, count records
//! registered after a given instant. Schema and layout management belong to
//! the implementation, never to the callers.
//!
//! Two embedded backends ship with the crate:
//!
//! - [`MemoryStore`]: process-local, for tests and throwaway sessions.
//! - [`JsonStore`]: a single JSON document on disk, written atomically
//!   (unique temp file + rename), so a crash mid-write never corrupts the
//!   previous state.

mod error;
mod json;
mod memory;

pub use error::{StoreError, StoreErrorExt};
pub use json::JsonStore;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use densite_domain::Locality;
use std::fmt::Debug;

/// Durable home of locality records, consumed through a narrow interface.
///
/// Implementations must be safe to share across threads; the registry and the
/// watcher both hold the same `Arc<dyn LocalityStore>`.
pub trait LocalityStore: Debug + Send + Sync {
    /// Persists one locality.
    ///
    /// # Errors
    /// Returns [`StoreError::Conflict`] when a record with the same name
    /// (case-insensitively) already exists, or a backend failure otherwise.
    fn insert(&self, locality: &Locality) -> Result<(), StoreError>;

    /// Fetches every stored locality, oldest registration first.
    ///
    /// # Errors
    /// Returns a backend failure if the underlying medium cannot be read.
    fn fetch_all(&self) -> Result<Vec<Locality>, StoreError>;

    /// Counts records whose registration timestamp is strictly greater than
    /// `since`.
    ///
    /// # Errors
    /// Returns a backend failure if the underlying medium cannot be read.
    fn count_changed_since(&self, since: DateTime<Utc>) -> Result<u64, StoreError>;
}

pub(crate) fn name_taken(existing: &[Locality], candidate: &str) -> bool {
    let candidate = candidate.to_lowercase();
    existing.iter().any(|l| l.name().to_lowercase() == candidate)
}
