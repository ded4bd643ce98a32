//! Helpers for running tests inside a [`figment::Jail`].
//!
//! A jail gives each test a fresh working directory and restores any
//! environment variables it sets, which suits end-to-end tests that read the
//! live process environment and configuration files by relative path.

use anyhow::{Result, anyhow};
use camino::Utf8PathBuf;

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when it fails.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure returns a
/// [`figment::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Writes `contents` to `name` inside the jail and returns its absolute path.
///
/// # Errors
///
/// Returns an error when the file cannot be written or the jail directory is
/// not valid UTF-8.
pub fn jail_file(jail: &figment::Jail, name: &str, contents: &str) -> figment::error::Result<Utf8PathBuf> {
    jail.create_file(name, contents)?;
    let absolute = jail.directory().join(name);
    Utf8PathBuf::from_path_buf(absolute)
        .map_err(|p| figment::Error::from(format!("non UTF-8 jail path: {}", p.display())))
}
