use crate::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Population classification of a locality.
///
/// The set is closed: report grouping iterates over every variant explicitly
/// ([`strum::IntoEnumIterator`]) so empty categories still render.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LocalityKind {
    Urban,
    Rural,
}

/// A validated, immutable-after-construction locality record.
///
/// Invariants are enforced once, at construction, and never re-checked:
/// the name is non-empty after trimming (and stored trimmed), and the area is
/// strictly positive and finite. Population non-negativity is carried by the
/// unsigned type. `registered_at` is stamped at construction and is not
/// caller-settable.
#[derive(Debug, Clone, PartialEq)]
pub struct Locality {
    name: String,
    population: u64,
    area: f64,
    kind: LocalityKind,
    registered_at: DateTime<Utc>,
}

impl Locality {
    /// Creates a validated locality stamped with the current time.
    ///
    /// # Errors
    /// Returns [`DomainError::Validation`] if the name is blank or the area is
    /// not strictly positive and finite.
    pub fn new(
        name: impl Into<String>,
        population: u64,
        area: f64,
        kind: LocalityKind,
    ) -> Result<Self, DomainError> {
        Self::from_parts(name, population, area, kind, Utc::now())
    }

    /// Rehydrates a locality with an explicit registration timestamp.
    ///
    /// Intended for storage collaborators reading back persisted records; runs
    /// the exact same validation as [`Locality::new`].
    ///
    /// # Errors
    /// Returns [`DomainError::Validation`] if the name is blank or the area is
    /// not strictly positive and finite.
    pub fn from_parts(
        name: impl Into<String>,
        population: u64,
        area: f64,
        kind: LocalityKind,
        registered_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation {
                message: "locality name must not be empty".into(),
                context: None,
            });
        }
        if !(area.is_finite() && area > 0.0) {
            return Err(DomainError::Validation {
                message: format!("locality area must be strictly positive, got {area}").into(),
                context: Some(trimmed.to_owned().into()),
            });
        }

        Ok(Self { name: trimmed.to_owned(), population, area, kind, registered_at })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn population(&self) -> u64 {
        self.population
    }

    #[must_use]
    pub const fn area(&self) -> f64 {
        self.area
    }

    #[must_use]
    pub const fn kind(&self) -> LocalityKind {
        self.kind
    }

    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Population density in inhabitants per unit area.
    ///
    /// Always finite and non-negative: area positivity is a construction
    /// invariant.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn density(&self) -> f64 {
        self.population as f64 / self.area
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} inhabitants over {:.2} km², {:.2}/km²",
            self.name,
            self.kind,
            self.population,
            self.area,
            self.density()
        )
    }
}
