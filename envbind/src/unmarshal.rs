//! Entry points binding a target struct to the environment and JSON files.

use camino::Utf8Path;

use crate::error::EnvResult;
use crate::flatten::FlatMap;
use crate::resolve::resolve;
use crate::sources::{load_files, read_env};
use crate::walker::Bind;

/// Separator joining nested key segments, in both struct keys and file keys.
pub const KEY_CONNECTOR: &str = "_";

/// Convenience empty path list for calls that read no files.
pub const NO_FILES: &[&str] = &[];

/// Populate `target` from the process environment and `paths`.
///
/// Files are read in order; later files overwrite keys of earlier ones, and
/// the environment takes priority over every file.
///
/// # Errors
///
/// See [`unmarshal_map`].
pub fn unmarshal<T, P>(target: &mut T, paths: &[P]) -> EnvResult<()>
where
    T: Bind + ?Sized,
    P: AsRef<Utf8Path>,
{
    unmarshal_map(&read_env(), target, paths)
}

/// Populate `target` from the process environment and exactly one file.
///
/// # Errors
///
/// See [`unmarshal_map`].
pub fn unmarshal_file<T, P>(path: P, target: &mut T) -> EnvResult<()>
where
    T: Bind + ?Sized,
    P: AsRef<Utf8Path>,
{
    unmarshal_map(&read_env(), target, &[path])
}

/// Populate `target` from a caller-supplied environment map and `paths`.
///
/// # Errors
///
/// - [`EnvError::TargetNotStruct`](crate::EnvError::TargetNotStruct) when
///   `target` is a scalar rather than a configuration struct.
/// - [`EnvError::File`](crate::EnvError::File) when a file cannot be read or
///   decoded.
/// - Any resolution error, see [`resolve`](crate::resolve()).
///
/// Fields assigned before a failure keep their new values.
///
/// # Examples
///
/// ```
/// use envbind::{EnvConfig, NO_FILES, env_from_entries, unmarshal_map};
///
/// #[derive(Debug, Default, EnvConfig)]
/// struct Settings {
///     #[env(key = "VAR")]
///     var: String,
///     #[env(key = "MISSING_VAR", default = "missing")]
///     missing_var: String,
///     #[env(key = "REQUIRED_VAR", required)]
///     required_var: String,
/// }
///
/// let env = env_from_entries(["VAR=Something", "REQUIRED_VAR=Here"]);
/// let mut settings = Settings::default();
/// unmarshal_map(&env, &mut settings, NO_FILES)?;
/// assert_eq!(settings.var, "Something");
/// assert_eq!(settings.missing_var, "missing");
/// assert_eq!(settings.required_var, "Here");
/// # Ok::<(), envbind::EnvError>(())
/// ```
pub fn unmarshal_map<T, P>(env: &FlatMap, target: &mut T, paths: &[P]) -> EnvResult<()>
where
    T: Bind + ?Sized,
    P: AsRef<Utf8Path>,
{
    let mut bindings = target.walk_root(KEY_CONNECTOR)?;
    let file = load_files(paths, KEY_CONNECTOR)?;
    tracing::debug!(
        keys = bindings.len(),
        fields = bindings.field_count(),
        files = paths.len(),
        "resolving configuration"
    );
    resolve(&mut bindings, env, &file)
}
