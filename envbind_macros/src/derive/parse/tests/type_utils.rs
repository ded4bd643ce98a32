//! Tests for type introspection helpers.

use super::super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{Type, parse_quote};

#[rstest]
#[case::vec(parse_quote!(Vec<String>), "Vec<String>")]
#[case::qualified_map(parse_quote!(std::collections::HashMap<String, u8>), "std::collections::HashMap<String,u8>")]
#[case::btree(parse_quote!(BTreeMap<String, String>), "BTreeMap<String,String>")]
#[case::set(parse_quote!(HashSet<u16>), "HashSet<u16>")]
#[case::option(parse_quote!(Option<u16>), "Option<u16>")]
#[case::boxed(parse_quote!(Box<str>), "Box<str>")]
#[case::array(parse_quote!([u8; 4]), "[u8;4]")]
#[case::tuple(parse_quote!((u8, u8)), "(u8,u8)")]
#[case::reference(parse_quote!(&'static str), "&'static str")]
#[case::pointer(parse_quote!(*const u8), "*const u8")]
fn recognises_unbindable_types(#[case] ty: Type, #[case] expected: &str) -> Result<()> {
    let name = unbindable_container(&ty).ok_or_else(|| anyhow!("expected container"))?;
    ensure!(name == expected, "expected {expected}, got {name}");
    Ok(())
}

#[rstest]
#[case::string(parse_quote!(String))]
#[case::int(parse_quote!(u16))]
#[case::float(parse_quote!(f64))]
#[case::nested(parse_quote!(DatabaseConfig))]
#[case::qualified(parse_quote!(crate::config::Server))]
fn leaves_bindable_types_alone(#[case] ty: Type) {
    assert!(unbindable_container(&ty).is_none());
}
