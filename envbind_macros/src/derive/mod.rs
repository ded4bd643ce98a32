//! Expansion pipeline for `#[derive(EnvConfig)]`.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;

/// Parse `input` and generate the trait implementation.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    Ok(generate::generate_impl(input, &parsed, &krate))
}
