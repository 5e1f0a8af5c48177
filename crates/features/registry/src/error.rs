use densite_store::StoreError;
use std::borrow::Cow;

/// Registry error type.
#[densite_derive::densite_error]
pub enum RegistryError {
    /// A locality with the same (case-insensitive) name is already registered.
    #[error("Duplicate name{}: {message}", format_context(.context))]
    DuplicateName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The storage collaborator failed; the in-memory mirror was left unchanged.
    #[error("Store failure{}: {source}", format_context(.context))]
    Store { source: StoreError, context: Option<Cow<'static, str>> },
}
