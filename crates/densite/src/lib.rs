//! Facade crate for the density registry platform.
//! Re-exports domain primitives and aggregates service composition.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Call [`config::load_config`] to layer a config file with `DENSITE__` env overrides.
//! - Call [`App::init`] to open the store, fill the registry mirror and wire the watcher.

mod app;
pub mod config;
mod error;

pub use crate::app::App;
pub use crate::error::{AppError, AppErrorExt};

pub use densite_domain as domain;
pub use densite_logger as logger;
pub use densite_registry as registry;
pub use densite_reports as reports;
pub use densite_store as store;
pub use densite_watcher as watcher;

pub use densite_domain::{DensityStats, Locality, LocalityKind, config::AppConfig};
