//! Procedural macros for `envbind`.
//!
//! `#[derive(EnvConfig)]` turns the `#[env(...)]` annotations of a struct's
//! named fields into an `EnvConfig::bind_fields` implementation that
//! registers each field with the runtime walker. Scalars and nested structs
//! are bound; sequences, maps, options and references are reported to the
//! walker as skipped; fields without `#[env]` are ignored.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `envbind::EnvConfig`.
///
/// Field attribute keys:
///
/// - `key = "NAME"`: a key the field is reachable under; repeat for aliases.
///   Without any `key`, the field name in `SHOUTY_SNAKE_CASE` is used.
/// - `required` or `required = true|false`: fail when no layer sets the field.
/// - `default = <literal>`: raw default value, coerced like any other value.
///
/// Struct attribute keys:
///
/// - `crate = "path"`: path of the runtime crate when it is renamed.
#[proc_macro_derive(EnvConfig, attributes(env))]
pub fn derive_env_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
