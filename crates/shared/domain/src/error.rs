use std::borrow::Cow;

/// Domain validation error type.
#[densite_derive::densite_error]
pub enum DomainError {
    /// A locality field violated a construction invariant.
    #[error("Validation failed{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
