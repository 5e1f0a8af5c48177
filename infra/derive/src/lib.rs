#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the workspace error convention.
//!
//! Every error enum in the workspace is declared through [`macro@densite_error`]:
//! named-field variants carrying either a `message` or a `source`, plus an
//! optional `context: Option<Cow<'static, str>>` slot that callers fill through
//! the generated `{Name}Ext::context` combinator.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro that turns an enum into a workspace error type.
///
/// # Generated items
///
/// * `#[derive(Debug, thiserror::Error)]` on the enum (unless already derived).
/// * A `pub trait {Name}Ext<T>` with a `context(..)` method, implemented for
///   `Result<T, {Name}>` (fills the `context` field of the current variant)
///   and for `Result<T, SourceTy>` of every variant with a `source` field
///   (converts and attaches context in one step).
/// * `From<SourceTy>` for every variant with a `source` field.
/// * `From<&'static str>` / `From<String>` when an `Internal` variant exists.
/// * A module-local `format_context` helper usable inside `#[error(..)]`
///   display strings.
///
/// # Constraints
///
/// * Variants must use named fields.
/// * A variant with a `source` field must also carry
///   `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[densite_derive::densite_error]
/// pub enum StoreError {
///     #[error("Backend failure{}: {message}", format_context(.context))]
///     Backend { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn densite_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
