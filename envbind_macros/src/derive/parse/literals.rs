//! Literal parsing helpers for derive attributes.

use syn::{Lit, LitStr};

/// Parses a literal from a field attribute using `extractor`.
fn parse_lit<T, F>(meta: &syn::meta::ParseNestedMeta, key: &str, expected: &str, extractor: F) -> syn::Result<T>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be a {expected}")))
}

/// Parses a string literal from an attribute.
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

/// Parses a boolean literal from an attribute.
pub(crate) fn lit_bool(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<bool> {
    parse_lit(meta, key, "bool", |lit| match lit {
        Lit::Bool(b) => Some(b.value),
        _ => None,
    })
}

/// Parses a `default = ...` literal into the raw string the runtime coerces.
///
/// Strings are taken verbatim; integer, float and bool literals use their
/// source digits (suffixes dropped), so `default = 8080` and
/// `default = "8080"` are equivalent.
pub(crate) fn lit_default(meta: &syn::meta::ParseNestedMeta) -> syn::Result<String> {
    parse_lit(meta, "default", "string, integer, float or bool literal", |lit| match lit {
        Lit::Str(s) => Some(s.value()),
        Lit::Int(i) => Some(i.base10_digits().to_owned()),
        Lit::Float(f) => Some(f.base10_digits().to_owned()),
        Lit::Bool(b) => Some(b.value.to_string()),
        _ => None,
    })
}
