//! Constructors and classification helpers for `EnvError`.

use camino::Utf8Path;

use super::EnvError;
use crate::coerce::CoerceError;
use crate::walker::Source;

impl EnvError {
    /// Wrap a conversion failure for `key`.
    ///
    /// Unsupported target kinds surface as [`Self::UnsupportedFieldType`];
    /// every other failure becomes [`Self::Coerce`].
    ///
    /// # Examples
    ///
    /// ```
    /// use envbind::{CoerceError, EnvError, Source};
    /// let err = EnvError::coerce("PORT", Source::Env, CoerceError::Unsupported { kind: "Vec<u8>" });
    /// assert!(matches!(err, EnvError::UnsupportedFieldType { .. }));
    /// ```
    #[must_use]
    pub fn coerce(key: &str, origin: Source, source: CoerceError) -> Self {
        match source {
            CoerceError::Unsupported { kind } => Self::UnsupportedFieldType {
                key: key.to_owned(),
                actual: kind.to_owned(),
            },
            other => Self::Coerce {
                key: key.to_owned(),
                origin,
                source: other,
            },
        }
    }

    /// Construct a [`Self::File`] error for `path`.
    #[must_use]
    pub fn file(path: &Utf8Path, err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source: err.into(),
        }
    }

    /// Whether a required field received no value from any layer.
    ///
    /// # Examples
    ///
    /// ```
    /// use envbind::EnvError;
    /// let err = EnvError::RequiredKeyNotPresent { keys: vec!["HOST".into()] };
    /// assert!(err.is_required_key_not_present());
    /// ```
    #[must_use]
    pub const fn is_required_key_not_present(&self) -> bool {
        matches!(self, Self::RequiredKeyNotPresent { .. })
    }

    /// Keys reported by a [`Self::RequiredKeyNotPresent`] error.
    ///
    /// Returns an empty slice for every other variant.
    #[must_use]
    pub fn missing_keys(&self) -> &[String] {
        match self {
            Self::RequiredKeyNotPresent { keys } => keys,
            _ => &[],
        }
    }
}
