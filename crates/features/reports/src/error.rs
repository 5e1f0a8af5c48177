use std::borrow::Cow;

/// Report generation error type.
#[densite_derive::densite_error]
pub enum ReportError {
    /// The configuration is unusable; checked before any data or I/O work.
    #[error("Configuration error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The destination could not be written; the report is aborted whole.
    #[error("Report I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}
