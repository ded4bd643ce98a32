//! Test helpers shared across the envbind workspace.
//!
//! - [`env`]: RAII guards for mutating the process environment.
//! - [`fixtures`]: JSON configuration files in temporary directories.
//! - [`figment`]: running tests inside a figment jail.

pub mod env;
pub mod figment;
pub mod fixtures;
