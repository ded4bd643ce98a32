//! Field bindings: a setter over a field's storage plus its policy.

use std::fmt;

use crate::annotation::Annotation;
use crate::coerce::{CoerceError, FieldKind, Scalar};
use crate::error::{EnvError, EnvResult};

/// Layer that satisfied a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    /// Not yet satisfied.
    #[default]
    Unset,
    /// Satisfied from the environment.
    Env,
    /// Satisfied from a configuration file.
    File,
    /// Satisfied from the declared default.
    Default,
    /// Left at the field's initial value.
    Untouched,
}

impl Source {
    /// Whether a layer has already claimed the binding.
    #[must_use]
    pub const fn is_satisfied(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unset => "unset",
            Self::Env => "environment",
            Self::File => "config file",
            Self::Default => "default",
            Self::Untouched => "initial value",
        })
    }
}

type Setter<'a> = Box<dyn FnMut(&str) -> Result<(), CoerceError> + 'a>;

/// Storage of one configuration field together with its required/default
/// policy and the layer that last assigned it.
pub struct FieldBinding<'a> {
    setter: Setter<'a>,
    kind: FieldKind,
    required: bool,
    default: Option<String>,
    source: Source,
}

impl<'a> FieldBinding<'a> {
    /// Bind a scalar field using the policy carried by `annotation`.
    pub fn scalar<T: Scalar>(slot: &'a mut T, annotation: &Annotation) -> Self {
        let setter: Setter<'a> = Box::new(move |raw: &str| {
            *slot = T::coerce(raw)?;
            Ok(())
        });
        Self::from_setter(setter, T::KIND, annotation)
    }

    /// Bind an arbitrary setter.
    ///
    /// Used for storage that is not a plain [`Scalar`]; `kind` is reported in
    /// diagnostics only.
    pub fn from_setter<F>(setter: F, kind: FieldKind, annotation: &Annotation) -> Self
    where
        F: FnMut(&str) -> Result<(), CoerceError> + 'a,
    {
        Self {
            setter: Box::new(setter),
            kind,
            required: annotation.is_required(),
            default: annotation.default_value().map(str::to_owned),
            source: Source::Unset,
        }
    }

    /// Native kind of the bound field.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether the field must be supplied by some layer.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Declared default, if any. Empty defaults are treated as absent.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Layer that satisfied the binding so far.
    #[must_use]
    pub const fn source(&self) -> Source {
        self.source
    }

    /// Coerce `raw` into the field and record `origin` as its source.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Coerce`] (or [`EnvError::UnsupportedFieldType`])
    /// tagged with `key` when `raw` does not convert.
    pub fn assign(&mut self, key: &str, raw: &str, origin: Source) -> EnvResult<()> {
        (self.setter)(raw).map_err(|err| EnvError::coerce(key, origin, err))?;
        self.source = origin;
        tracing::trace!(key, %origin, "assigned configuration value");
        Ok(())
    }

    /// Apply the declared default, or mark the field untouched when there is
    /// none.
    ///
    /// # Errors
    ///
    /// Returns an error when the default does not convert into the field.
    pub fn apply_default(&mut self, key: &str) -> EnvResult<()> {
        let Some(default) = self.default.as_deref() else {
            self.source = Source::Untouched;
            return Ok(());
        };
        (self.setter)(default).map_err(|err| EnvError::coerce(key, Source::Default, err))?;
        self.source = Source::Default;
        tracing::trace!(key, origin = %Source::Default, "assigned configuration value");
        Ok(())
    }
}

impl fmt::Debug for FieldBinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
