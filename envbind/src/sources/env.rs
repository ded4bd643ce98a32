//! Environment layer.

use crate::flatten::FlatMap;

/// Snapshot the live process environment.
///
/// Variables whose name or value is not valid UTF-8, and variables with an
/// empty name, are skipped.
#[must_use]
pub fn read_env() -> FlatMap {
    let mut map = FlatMap::new();
    for (name, value) in std::env::vars_os() {
        match (name.into_string(), value.into_string()) {
            (Ok(name), Ok(value)) if !name.is_empty() => {
                map.insert(name, value);
            }
            (Ok(name), Err(_)) => {
                tracing::debug!(name, "skipping environment variable with non-UTF-8 value");
            }
            _ => {}
        }
    }
    map
}

/// Build an environment map from `NAME=value` entries.
///
/// The value is everything after the first `=`. Entries without `=` or with
/// an empty name are skipped; later entries overwrite earlier ones.
///
/// # Examples
///
/// ```
/// use envbind::env_from_entries;
/// let env = env_from_entries(["A=1", "B=x=y", "broken", "=nameless"]);
/// assert_eq!(env.len(), 2);
/// assert_eq!(env["B"], "x=y");
/// ```
#[must_use]
pub fn env_from_entries<I, S>(entries: I) -> FlatMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            let (name, value) = entry.as_ref().split_once('=')?;
            (!name.is_empty()).then(|| (name.to_owned(), value.to_owned()))
        })
        .collect()
}
