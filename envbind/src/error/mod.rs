//! Error types produced while binding configuration.

mod constructors;
mod types;

pub use types::{EnvError, EnvResult};
