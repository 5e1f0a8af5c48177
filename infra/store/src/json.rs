use crate::{LocalityStore, StoreError, StoreErrorExt, name_taken};
use chrono::{DateTime, Utc};
use densite_domain::{Locality, LocalityKind};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

const TMP_MARKER: &str = ".densitetmp.";

/// On-disk record layout. Kept separate from [`Locality`] so rehydration goes
/// through domain validation instead of trusting the file.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLocality {
    name: String,
    population: u64,
    area: f64,
    kind: LocalityKind,
    registered_at: DateTime<Utc>,
}

impl From<&Locality> for StoredLocality {
    fn from(locality: &Locality) -> Self {
        Self {
            name: locality.name().to_owned(),
            population: locality.population(),
            area: locality.area(),
            kind: locality.kind(),
            registered_at: locality.registered_at(),
        }
    }
}

impl StoredLocality {
    fn into_locality(self) -> Result<Locality, densite_domain::DomainError> {
        Locality::from_parts(self.name, self.population, self.area, self.kind, self.registered_at)
    }
}

/// Store backend keeping every record in one JSON document.
///
/// Writes follow the atomic-swap pattern: the new document is written to a
/// unique temporary file, synced, then renamed over the target. Readers either
/// see the previous document or the new one, never a torn write.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    /// Serializes the read-modify-write cycle of `insert`.
    write_lock: Mutex<()>,
    /// A unique counter used to generate temporary file names.
    tmp_counter: AtomicU64,
}

impl JsonStore {
    /// Opens (or prepares) a JSON-document store at `path`.
    ///
    /// The document itself is created lazily on the first insert; this call
    /// bootstraps the parent directory and sweeps temporary files left behind
    /// by a previous crash.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .context(format!("Failed to bootstrap store directory: {}", parent.display()))?;
            purge_tmp(parent);
        }

        Ok(Self { path, write_lock: Mutex::new(()), tmp_counter: AtomicU64::new(1) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and validates the whole document. Records that fail domain
    /// validation are logged and skipped rather than poisoning the load.
    fn load(&self) -> Result<Vec<Locality>, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(StoreError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", self.path.display()).into()),
                });
            },
        };

        let records: Vec<StoredLocality> = serde_json::from_slice(&raw)
            .context(format!("Malformed store document: {}", self.path.display()))?;

        let mut localities = Vec::with_capacity(records.len());
        for record in records {
            match record.into_locality() {
                Ok(locality) => localities.push(locality),
                Err(err) => warn!(error = %err, "Skipping invalid record in store document"),
            }
        }
        Ok(localities)
    }

    fn persist(&self, records: &[StoredLocality]) -> Result<(), StoreError> {
        let encoded = serde_json::to_vec_pretty(records).context("Document encoding failed")?;

        let temp = self.unique_tmp_path();
        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&encoded).context("Write failed")?;
            file.sync_all().context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, &self.path) {
            if err.kind() == std::io::ErrorKind::AlreadyExists {
                fs::remove_file(&self.path).context(format!(
                    "Failed to replace existing document: {}",
                    self.path.display()
                ))?;
                fs::rename(&temp, &self.path).context(format!(
                    "Atomic swap failed: {} -> {}",
                    temp.display(),
                    self.path.display()
                ))?;
            } else {
                return Err(StoreError::Io {
                    source: err,
                    context: Some(
                        format!("Atomic swap failed: {} -> {}", temp.display(), self.path.display())
                            .into(),
                    ),
                });
            }
        }

        debug!(path = %self.path.display(), records = records.len(), "Store document saved atomically");
        Ok(())
    }

    fn unique_tmp_path(&self) -> PathBuf {
        let counter = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let file_name = self.path.file_name().and_then(|s| s.to_str()).unwrap_or("store");
        self.path.with_file_name(format!("{file_name}{TMP_MARKER}{counter}"))
    }
}

impl LocalityStore for JsonStore {
    fn insert(&self, locality: &Locality) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();

        let existing = self.load()?;
        if name_taken(&existing, locality.name()) {
            return Err(StoreError::Conflict {
                message: format!("a locality named {:?} already exists", locality.name()).into(),
                context: None,
            });
        }

        let mut records: Vec<StoredLocality> = existing.iter().map(StoredLocality::from).collect();
        records.push(StoredLocality::from(locality));
        self.persist(&records)
    }

    fn fetch_all(&self) -> Result<Vec<Locality>, StoreError> {
        self.load()
    }

    fn count_changed_since(&self, since: DateTime<Utc>) -> Result<u64, StoreError> {
        let count = self.load()?.iter().filter(|l| l.registered_at() > since).count();
        Ok(count as u64)
    }
}

/// Removes temporary files left behind by a crash mid-swap. Non-critical:
/// failures are logged, never surfaced.
fn purge_tmp(dir: &Path) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = %dir.display(), error = %err, "Temp sweep skipped");
            return;
        },
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let is_tmp = path
            .file_name()
            .and_then(|s| s.to_str())
            .is_some_and(|name| name.contains(TMP_MARKER));
        if is_tmp && let Err(err) = fs::remove_file(&path) {
            warn!(path = %path.display(), error = %err, "Stale temp file not removed");
        }
    }
}
