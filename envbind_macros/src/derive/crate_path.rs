//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[env(crate = "...")]` attribute value into the
//! tokens that prefix every runtime path in generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `::envbind` when no override is present.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::envbind }, |path| quote! { #path })
}
