#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by the persona crates.
//!
//! The only macro today is [`macro@persona_error`], which turns a plain enum into an error
//! type wired for `thiserror`, `?` conversions and `.context(..)` annotations.
//!
//! Consumers depend on this crate and on `thiserror` (the expansion names `::thiserror`).

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` whose error converts into this enum.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a source field,
///   so `?` works on upstream errors.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal` variant exists.
/// * **Result Alias**: `#[persona_error(result)]` also emits
///   `pub type Result<T, E = ErrorName> = std::result::Result<T, E>;`.
///
/// # Requirements
///
/// 1. Applied to an **enum** whose variants all have named fields.
/// 2. A `context` field, if present, must be `Option<Cow<'static, str>>`.
/// 3. Variants with a `source` field (or a field marked `#[source]`/`#[from]`) must also
///    carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use persona_derive::persona_error;
/// use std::borrow::Cow;
///
/// #[persona_error(result)]
/// pub enum ConfigError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Settings> {
///     builder.build().context("Building layered config")?;
///     Err("not wired yet".into())
/// }
/// ```
#[proc_macro_attribute]
pub fn persona_error(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(args.into(), input).into()
}
