//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies
//! (`serde`, `chrono`, `strum`). Keep it lean: no I/O, no locking, no async;
//! just data, validation, and simple derived values.

pub mod config;
mod error;
mod locality;
mod stats;

pub use error::{DomainError, DomainErrorExt};
pub use locality::{Locality, LocalityKind};
pub use stats::DensityStats;
