//! Parsing of `#[env(...)]` attributes for the `EnvConfig` derive.

use syn::{Attribute, Meta, Token};

mod input;
mod literals;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use input::{ParsedInput, parse_input};
use literals::{lit_bool, lit_default, lit_str};
pub(crate) use type_utils::unbindable_container;

/// Struct-level attributes recognised by `#[derive(EnvConfig)]`.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[env(crate = "my_alias")]`, generated code references
    /// types through `my_alias::` instead of `::envbind::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(EnvConfig)]`.
///
/// - `present` records whether the field carries `#[env]` at all; fields
///   without it are not bound.
/// - `keys` lists the declared key names in order.
/// - `required` marks a field that some layer must set.
/// - `default` holds the raw default string.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub present: bool,
    pub keys: Vec<String>,
    pub required: bool,
    pub default: Option<String>,
}

fn env_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|a| a.path().is_ident("env"))
}

/// Extracts `#[env(...)]` metadata applied to a struct.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    for attr in env_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let s = lit_str(&meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            } else {
                Err(meta.error("unknown struct-level env attribute; expected `crate`"))
            }
        })?;
    }
    Ok(out)
}

/// Extracts `#[env(...)]` metadata applied to a field.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in env_attrs(attrs) {
        out.present = true;
        if matches!(attr.meta, Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let Some(ident) = meta.path.get_ident().map(ToString::to_string) else {
                return Err(meta.error("expected `key`, `required` or `default`"));
            };
            match ident.as_str() {
                "key" => {
                    let key = lit_str(&meta, "key")?;
                    let value = key.value();
                    if value.is_empty() {
                        return Err(syn::Error::new(key.span(), "key must be a non-empty string"));
                    }
                    out.keys.push(value);
                    Ok(())
                }
                "required" => {
                    out.required = if meta.input.peek(Token![=]) {
                        lit_bool(&meta, "required")?
                    } else {
                        true
                    };
                    Ok(())
                }
                "default" => {
                    out.default = Some(lit_default(&meta)?);
                    Ok(())
                }
                other => Err(meta.error(format!(
                    "unknown env attribute `{other}`; expected `key`, `required` or `default`"
                ))),
            }
        })?;
    }
    Ok(out)
}
