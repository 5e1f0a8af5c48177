use crate::config::ConfigError;
use densite_registry::RegistryError;
use densite_reports::ReportError;
use densite_store::StoreError;
use std::borrow::Cow;

/// Top-level error for application composition and command handling.
#[densite_derive::densite_error]
pub enum AppError {
    #[error("Configuration error{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Store error{}: {source}", format_context(.context))]
    Store { source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Registry error{}: {source}", format_context(.context))]
    Registry { source: RegistryError, context: Option<Cow<'static, str>> },

    #[error("Report error{}: {source}", format_context(.context))]
    Report { source: ReportError, context: Option<Cow<'static, str>> },
}
