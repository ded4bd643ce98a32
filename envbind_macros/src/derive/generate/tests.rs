//! Tests for `EnvConfig` implementation generation.

use super::*;
use crate::derive::parse::parse_input;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::parse_quote;

fn expand(input: &DeriveInput) -> Result<String> {
    let parsed = parse_input(input).map_err(|err| anyhow!(err))?;
    Ok(generate_impl(input, &parsed, &quote! { ::envbind }).to_string())
}

#[test]
fn binds_annotated_fields_with_options() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[env(key = "REQUIRED_VAR", required, default = "x")]
            required_var: String,
        }
    };
    let output = expand(&input)?;
    let expected = quote! {
        walker.bind(
            &mut self.required_var,
            &::envbind::Annotation::new(["REQUIRED_VAR"])
                .with_option(::envbind::OPTION_REQUIRED, "true")
                .with_option(::envbind::OPTION_DEFAULT, "x")
        );
    }
    .to_string();
    ensure!(output.contains(&expected), "missing bind call in: {output}");
    ensure!(
        output.contains("impl :: envbind :: EnvConfig for Demo"),
        "missing impl header in: {output}"
    );
    Ok(())
}

#[rstest]
#[case::field_name(quote!(#[env] http_port: u16), "\"HTTP_PORT\"")]
#[case::raw_ident(quote!(#[env] r#type: String), "\"TYPE\"")]
#[case::camel(quote!(#[env] apiToken: String), "\"API_TOKEN\"")]
fn bare_attribute_derives_key(#[case] field: TokenStream, #[case] key: &str) -> Result<()> {
    let input: DeriveInput = syn::parse2(quote! { struct Demo { #field } })?;
    let output = expand(&input)?;
    ensure!(output.contains(key), "expected key {key} in: {output}");
    Ok(())
}

#[test]
fn aliases_are_emitted_in_order() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[env(key = "HOST", key = "SERVER_HOST")]
            host: String,
        }
    };
    let output = expand(&input)?;
    ensure!(
        output.contains("Annotation :: new ([\"HOST\" , \"SERVER_HOST\"])"),
        "aliases missing or reordered in: {output}"
    );
    Ok(())
}

#[test]
fn containers_are_skipped() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[env(key = "TAGS")]
            tags: Vec<String>,
        }
    };
    let output = expand(&input)?;
    ensure!(
        output.contains("walker . skip (\"tags\" , \"Vec<String>\")"),
        "expected skip call in: {output}"
    );
    ensure!(!output.contains("walker . bind"), "container was bound: {output}");
    Ok(())
}

#[rstest]
#[case::wide_integer(quote!(#[env(key = "ID")] id: u128))]
#[case::character(quote!(#[env(key = "SEP")] sep: char))]
#[case::path(quote!(#[env(key = "DIR")] dir: std::path::PathBuf))]
fn non_container_types_are_bound_not_skipped(#[case] field: TokenStream) -> Result<()> {
    let input: DeriveInput = syn::parse2(quote! { struct Demo { #field } })?;
    let output = expand(&input)?;
    ensure!(output.contains("walker . bind"), "expected bind call in: {output}");
    ensure!(!output.contains("walker . skip"), "field was skipped: {output}");
    Ok(())
}

#[test]
fn unannotated_fields_produce_no_statements() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            ignored: String,
        }
    };
    let output = expand(&input)?;
    ensure!(output.contains("let _ = walker ;"), "expected empty body in: {output}");
    ensure!(!output.contains("ignored"), "ignored field leaked: {output}");
    Ok(())
}

#[test]
fn generics_are_forwarded() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo<T: Default> where T: Clone {
            #[env(key = "N")]
            n: u8,
            marker: T,
        }
    };
    let output = expand(&input)?;
    ensure!(
        output.contains("impl < T : Default > :: envbind :: EnvConfig for Demo < T > where T : Clone"),
        "generics not forwarded in: {output}"
    );
    Ok(())
}

#[test]
fn field_keys_prefers_declared_keys() {
    let ident: syn::Ident = parse_quote!(port);
    let attrs = FieldAttrs {
        present: true,
        keys: vec!["P".to_owned()],
        ..FieldAttrs::default()
    };
    assert_eq!(field_keys(&ident, &attrs), ["P"]);
    assert_eq!(field_keys(&ident, &FieldAttrs::default()), ["PORT"]);
}
