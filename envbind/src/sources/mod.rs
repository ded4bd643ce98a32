//! Readers for the raw value layers: the process environment and JSON
//! configuration files.

mod env;
mod file;

pub use env::{env_from_entries, read_env};
pub use file::{load_file, load_files};
