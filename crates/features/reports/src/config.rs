use private::Sealed;
use std::path::{Path, PathBuf};

/// Target encoding of a generated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Fixed-width columns, dash-ruled section headers.
    #[default]
    Text,
    /// Semicolon-separated values, UTF-8 with BOM, French number convention.
    Csv,
    /// Self-contained document with inline styling.
    Html,
}

impl ReportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Html => "html",
        }
    }
}

#[derive(Debug, Clone)]
struct ReportOptions {
    format: ReportFormat,
    limit: Option<usize>,
    include_statistics: bool,
    group_by_kind: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { format: ReportFormat::Text, limit: None, include_statistics: true, group_by_kind: false }
    }
}

/// Immutable configuration for one report run.
///
/// Built once through [`ReportConfig::builder`]; no setters exist afterwards,
/// so re-running over the same snapshot reproduces the same document.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    output: PathBuf,
    options: ReportOptions,
}

impl ReportConfig {
    #[must_use = "The configuration is not usable until you call .build()"]
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::new()
    }

    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    #[must_use]
    pub const fn format(&self) -> ReportFormat {
        self.options.format
    }

    /// Maximum number of entries; `None` means unbounded.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.options.limit
    }

    #[must_use]
    pub const fn include_statistics(&self) -> bool {
        self.options.include_statistics
    }

    #[must_use]
    pub const fn group_by_kind(&self) -> bool {
        self.options.group_by_kind
    }
}

#[derive(Debug, Default)]
pub struct NoOutput;
#[derive(Debug)]
pub struct WithOutput(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoOutput {}
impl Sealed for WithOutput {}

/// Type-safe fluent builder for [`ReportConfig`]; the output destination is
/// the one required transition.
#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct ReportConfigBuilder<S: Sealed = NoOutput> {
    state: S,
    options: ReportOptions,
}

#[allow(private_bounds)]
impl<S: Sealed> ReportConfigBuilder<S> {
    #[must_use = "Sets the target encoding of the report"]
    pub const fn format(mut self, format: ReportFormat) -> Self {
        self.options.format = format;
        self
    }

    #[must_use = "Caps the number of rendered entries"]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.options.limit = Some(limit);
        self
    }

    #[must_use = "Toggles the summary statistics block"]
    pub const fn include_statistics(mut self, enabled: bool) -> Self {
        self.options.include_statistics = enabled;
        self
    }

    #[must_use = "Toggles one section per locality kind"]
    pub const fn group_by_kind(mut self, enabled: bool) -> Self {
        self.options.group_by_kind = enabled;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> ReportConfigBuilder<N> {
        ReportConfigBuilder { state, options: self.options }
    }
}

impl ReportConfigBuilder<NoOutput> {
    #[must_use = "Creates a new report configuration builder"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the destination path of the report file"]
    pub fn output(self, path: impl Into<PathBuf>) -> ReportConfigBuilder<WithOutput> {
        self.transition(WithOutput(path.into()))
    }
}

impl ReportConfigBuilder<WithOutput> {
    /// Freezes the configuration.
    #[must_use]
    pub fn build(self) -> ReportConfig {
        ReportConfig { output: self.state.0, options: self.options }
    }
}
