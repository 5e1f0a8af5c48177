use std::borrow::Cow;

/// A specialized [`StoreError`] enum of this crate.
#[densite_derive::densite_error]
pub enum StoreError {
    /// A record with the same (case-insensitive) name already exists.
    #[error("Conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The backend rejected or failed the operation.
    #[error("Backend failure{}: {message}", format_context(.context))]
    Backend { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("File I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Document encoding failure{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },
}
