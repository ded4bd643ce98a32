//! Tests for `#[env(...)]` attribute parsing.

mod type_utils;
