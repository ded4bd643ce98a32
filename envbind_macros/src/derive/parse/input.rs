//! Input parsing for the `EnvConfig` derive macro.
//!
//! This module gathers the named fields and attribute metadata in one pass so
//! expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// Fields and attributes of the derive input.
pub(crate) struct ParsedInput {
    pub fields: Vec<(syn::Field, FieldAttrs)>,
    pub struct_attrs: StructAttrs,
}

/// Gathers information from the user-provided struct.
///
/// Enums, unions, tuple structs and unit structs are rejected: only structs
/// with named fields can be configuration targets.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "EnvConfig requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "EnvConfig can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let attrs = parse_field_attrs(&field.attrs)?;
        fields.push((field.clone(), attrs));
    }
    Ok(ParsedInput {
        fields,
        struct_attrs,
    })
}
