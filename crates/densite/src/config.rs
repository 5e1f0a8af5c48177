use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Custom error type for config loading.
#[densite_derive::densite_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from a file (e.g., `densite.toml`). If no path is provided,
///    it defaults to `"densite"` and the file becomes optional, so a bare install still starts
///    with built-in defaults.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with
///    `DENSITE__`. Nested structures are accessed using double underscores
///    (e.g., `DENSITE__WATCHER__INTERVAL_SECS` maps to `watcher.interval_secs`).
///
/// # Errors
/// This function will return an error if:
/// * An explicitly specified configuration file cannot be found.
/// * The content of the file does not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use densite::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct Settings {
///     verbose: bool,
/// }
///
/// let settings: Settings = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let explicit = path.is_some();
    let effective_path =
        path.map_or_else(|| PathBuf::from("densite"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(explicit))
        .add_source(
            Environment::with_prefix("DENSITE")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
