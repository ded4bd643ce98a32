//! Code generation for the `EnvConfig` derive.
//!
//! Each annotated field becomes one `walker.bind(...)` call carrying an
//! `Annotation` built from its attributes; container fields become
//! `walker.skip(...)` calls.

use heck::ToShoutySnakeCase;
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;
use syn::ext::IdentExt;

use super::parse::{FieldAttrs, ParsedInput, unbindable_container};

#[cfg(test)]
mod tests;

/// Key names for a field: the declared keys, or the field name in
/// `SHOUTY_SNAKE_CASE` when none were given.
pub(crate) fn field_keys(name: &syn::Ident, attrs: &FieldAttrs) -> Vec<String> {
    if attrs.keys.is_empty() {
        vec![name.unraw().to_string().to_shouty_snake_case()]
    } else {
        attrs.keys.clone()
    }
}

/// Build the `Annotation` expression for one field.
fn annotation_tokens(keys: &[String], attrs: &FieldAttrs, krate: &TokenStream) -> TokenStream {
    let required = attrs
        .required
        .then(|| quote! { .with_option(#krate::OPTION_REQUIRED, "true") });
    let default = attrs
        .default
        .as_ref()
        .map(|value| quote! { .with_option(#krate::OPTION_DEFAULT, #value) });
    quote! {
        #krate::Annotation::new([#(#keys),*]) #required #default
    }
}

/// Generate the statement registering one field.
fn field_statement(field: &syn::Field, attrs: &FieldAttrs, krate: &TokenStream) -> Option<TokenStream> {
    if !attrs.present {
        return None;
    }
    let ident = field.ident.as_ref()?;
    let name = ident.unraw().to_string();
    if let Some(type_name) = unbindable_container(&field.ty) {
        return Some(quote! { walker.skip(#name, #type_name); });
    }
    let keys = field_keys(ident, attrs);
    let annotation = annotation_tokens(&keys, attrs, krate);
    Some(quote! {
        walker.bind(&mut self.#ident, &#annotation);
    })
}

/// Generate the `EnvConfig` implementation for `input`.
pub(crate) fn generate_impl(input: &DeriveInput, parsed: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let statements: Vec<TokenStream> = parsed
        .fields
        .iter()
        .filter_map(|(field, attrs)| field_statement(field, attrs, krate))
        .collect();
    let body = if statements.is_empty() {
        quote! { let _ = walker; }
    } else {
        quote! { #(#statements)* }
    };
    quote! {
        impl #impl_generics #krate::EnvConfig for #ident #ty_generics #where_clause {
            fn bind_fields<'__env>(&'__env mut self, walker: &mut #krate::StructWalker<'__env>) {
                #body
            }
        }
    }
}
