mod config;
mod csv;
mod error;
mod html;
mod prepare;
mod text;
mod writer;

pub use self::{config::*, error::*};

use chrono::Local;
use densite_domain::Locality;
use std::path::PathBuf;
use tracing::info;

/// Renders a density report for `snapshot` and writes it to the configured
/// destination, returning the path of the finished document.
///
/// The configuration is validated before any data is touched; an empty
/// destination fails with [`ReportError::Config`]. The document is staged in
/// a temporary file and swapped in with a rename, so a crash mid-write never
/// leaves a truncated report behind.
///
/// # Errors
///
/// Returns [`ReportError::Config`] for an empty destination and
/// [`ReportError::Io`] when the destination cannot be written.
pub fn generate(snapshot: &[Locality], config: &ReportConfig) -> Result<PathBuf, ReportError> {
    if config.output().as_os_str().is_empty() {
        return Err(ReportError::Config {
            message: "report destination must not be empty".into(),
            context: None,
        });
    }

    let data = prepare::prepare(snapshot, config);
    let document = match config.format() {
        ReportFormat::Text => text::render(&data, config, Local::now()),
        ReportFormat::Csv => csv::render(&data, config),
        ReportFormat::Html => html::render(&data, config, Local::now()),
    };
    writer::write_atomic(config.output(), document.as_bytes())?;

    info!(
        path = %config.output().display(),
        entries = data.ordered.len(),
        format = ?config.format(),
        "density report generated"
    );
    Ok(config.output().to_path_buf())
}
