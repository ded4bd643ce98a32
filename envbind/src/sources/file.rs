//! JSON file layer.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde_json::Value;

use crate::error::{EnvError, EnvResult};
use crate::flatten::{FlatMap, flatten};

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Read `path` through a capability handle on its parent directory.
fn read_to_string(path: &Utf8Path) -> std::io::Result<String> {
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "cannot determine file name for configuration file path",
        )
    })?;
    let dir = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority())?;
    dir.read_to_string(file_name)
}

/// Read and flatten one JSON configuration file.
///
/// The top level must be a JSON object.
///
/// # Errors
///
/// Returns [`EnvError::File`] when the file is missing, unreadable, not valid
/// JSON, or not an object at the top level.
pub fn load_file(path: &Utf8Path, connector: &str) -> EnvResult<FlatMap> {
    let data = read_to_string(path).map_err(|e| EnvError::file(path, e))?;
    let value: Value = serde_json::from_str(&data).map_err(|e| EnvError::file(path, e))?;
    let Value::Object(map) = value else {
        return Err(EnvError::file(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "configuration file must contain a JSON object at the top level",
            ),
        ));
    };
    let flat = flatten(&map, connector);
    tracing::debug!(%path, keys = flat.len(), "loaded configuration file");
    Ok(flat)
}

/// Read every file in order and merge them; later files overwrite keys from
/// earlier ones.
///
/// # Errors
///
/// Stops at the first file that fails to load, see [`load_file`].
pub fn load_files<P>(paths: &[P], connector: &str) -> EnvResult<FlatMap>
where
    P: AsRef<Utf8Path>,
{
    let mut merged = FlatMap::new();
    for path in paths {
        merged.extend(load_file(path.as_ref(), connector)?);
    }
    Ok(merged)
}
