//! Primary error enum for configuration binding flows.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::coerce::CoerceError;
use crate::walker::Source;

/// Result alias used throughout the crate.
pub type EnvResult<T> = Result<T, EnvError>;

/// Errors that can occur while populating a configuration struct.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvError {
    /// The top-level target is not a struct.
    #[error("target passed must be a reference to a struct type, not a {actual}")]
    TargetNotStruct {
        /// Type name of the rejected target.
        actual: &'static str,
    },

    /// A required field received no value from any source.
    #[error("{}", required_message(.keys))]
    RequiredKeyNotPresent {
        /// Every key under which the unsatisfied field could have been set.
        keys: Vec<String>,
    },

    /// A bound field has a type the coercer cannot populate.
    #[error("field bound to '{key}' must be a string, integer, float, bool or struct, not a {actual}")]
    UnsupportedFieldType {
        /// Key that reached the field.
        key: String,
        /// Name of the field's type.
        actual: String,
    },

    /// A raw value failed to convert into the field's type.
    #[error("setting value of '{key}' from {origin}: {source}")]
    Coerce {
        /// Key whose value was rejected.
        key: String,
        /// Layer that supplied the value.
        origin: Source,
        /// Underlying conversion failure.
        #[source]
        source: CoerceError,
    },

    /// A configuration file could not be read or decoded.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path of the offending file.
        path: Utf8PathBuf,
        /// Underlying I/O or decoding error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

fn required_message(keys: &[String]) -> String {
    match keys {
        [single] => format!("required env key missing; {single} must be provided"),
        _ => format!(
            "required env key missing; one of the following keys must be provided [{}]",
            keys.join(", ")
        ),
    }
}
