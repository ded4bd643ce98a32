//! Conversion of raw string values into native field types.
//!
//! Every layer hands the resolver strings: environment values are strings
//! already and file values are stringified by the flattener. [`coerce`]
//! parses a raw string according to a [`FieldKind`]; [`Scalar`] narrows the
//! wide result into a concrete field type.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;

use thiserror::Error;


/// Native shape of a bindable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `bool`.
    Bool,
    /// Signed integer of the given width in bits.
    Signed {
        /// Width of the integer in bits.
        bits: u32,
    },
    /// Unsigned integer of the given width in bits.
    Unsigned {
        /// Width of the integer in bits.
        bits: u32,
    },
    /// Floating point number of the given width in bits.
    Float {
        /// Width of the float in bits.
        bits: u32,
    },
    /// `String`.
    Str,
    /// Anything the coercer cannot populate.
    Unsupported(&'static str),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Signed { bits } => write!(f, "i{bits}"),
            Self::Unsigned { bits } => write!(f, "u{bits}"),
            Self::Float { bits } => write!(f, "f{bits}"),
            Self::Str => f.write_str("string"),
            Self::Unsupported(name) => f.write_str(name),
        }
    }
}

/// Wide value produced by [`coerce`] before narrowing.
#[derive(Debug, Clone, PartialEq)]
pub enum Native {
    /// Parsed boolean.
    Bool(bool),
    /// Parsed signed integer.
    Signed(i64),
    /// Parsed unsigned integer.
    Unsigned(u64),
    /// Parsed float.
    Float(f64),
    /// Verbatim string.
    Str(String),
}

/// Failure converting a raw string into a field's type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoerceError {
    /// Value is not a boolean literal.
    #[error("casting {value:?} as bool: {source}")]
    InvalidBool {
        /// Rejected raw value.
        value: String,
        /// Parser failure.
        #[source]
        source: ParseBoolError,
    },

    /// Value is not a base-10 integer.
    #[error("casting {value:?} as integer: {source}")]
    InvalidInteger {
        /// Rejected raw value.
        value: String,
        /// Parser failure.
        #[source]
        source: ParseIntError,
    },

    /// Value is not a decimal or scientific float.
    #[error("casting {value:?} as float: {source}")]
    InvalidFloat {
        /// Rejected raw value.
        value: String,
        /// Parser failure.
        #[source]
        source: ParseFloatError,
    },

    /// Value rejected by a custom setter.
    #[error("casting {value:?} as {expected}")]
    Invalid {
        /// Rejected raw value.
        value: String,
        /// Name of the type the setter expected.
        expected: &'static str,
    },

    /// Value parsed but does not fit the field's width.
    #[error("{value:?} is out of range for {kind}")]
    OutOfRange {
        /// Rejected raw value.
        value: String,
        /// Kind of the target field.
        kind: FieldKind,
    },

    /// The target kind cannot be populated from a string.
    #[error("unsupported field type {kind}")]
    Unsupported {
        /// Name of the unsupported type.
        kind: &'static str,
    },
}

/// Parse `raw` according to `kind`.
///
/// Signed integers parse as `i64`, unsigned as `u64` and floats as `f64`;
/// narrowing to the declared width is left to [`Scalar::from_native`].
///
/// # Errors
///
/// Returns a [`CoerceError`] when `raw` does not parse as `kind` or when
/// `kind` is [`FieldKind::Unsupported`].
///
/// # Examples
///
/// ```
/// use envbind::{FieldKind, Native, coerce};
/// assert_eq!(coerce(FieldKind::Bool, "true").ok(), Some(Native::Bool(true)));
/// assert!(coerce(FieldKind::Signed { bits: 64 }, "ten").is_err());
/// ```
pub fn coerce(kind: FieldKind, raw: &str) -> Result<Native, CoerceError> {
    match kind {
        FieldKind::Bool => raw
            .parse()
            .map(Native::Bool)
            .map_err(|source| CoerceError::InvalidBool {
                value: raw.to_owned(),
                source,
            }),
        FieldKind::Signed { .. } => raw
            .parse()
            .map(Native::Signed)
            .map_err(|source| invalid_integer(raw, source)),
        FieldKind::Unsigned { .. } => raw
            .parse()
            .map(Native::Unsigned)
            .map_err(|source| invalid_integer(raw, source)),
        FieldKind::Float { .. } => raw
            .parse()
            .map(Native::Float)
            .map_err(|source| CoerceError::InvalidFloat {
                value: raw.to_owned(),
                source,
            }),
        FieldKind::Str => Ok(Native::Str(raw.to_owned())),
        FieldKind::Unsupported(kind) => Err(CoerceError::Unsupported { kind }),
    }
}

fn invalid_integer(raw: &str, source: ParseIntError) -> CoerceError {
    CoerceError::InvalidInteger {
        value: raw.to_owned(),
        source,
    }
}

/// Field types the resolver can assign directly.
pub trait Scalar: Sized {
    /// Kind used to parse raw values for this type.
    const KIND: FieldKind;

    /// Narrow a wide value into `Self`, returning `None` when it does not fit.
    fn from_native(native: Native) -> Option<Self>;

    /// Parse and narrow `raw` into `Self`.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] when `raw` does not parse or does not fit.
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        let native = coerce(Self::KIND, raw)?;
        Self::from_native(native).ok_or_else(|| CoerceError::OutOfRange {
            value: raw.to_owned(),
            kind: Self::KIND,
        })
    }
}

impl Scalar for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn from_native(native: Native) -> Option<Self> {
        match native {
            Native::Bool(value) => Some(value),
            _ => None,
        }
    }
}

impl Scalar for String {
    const KIND: FieldKind = FieldKind::Str;

    fn from_native(native: Native) -> Option<Self> {
        match native {
            Native::Str(value) => Some(value),
            _ => None,
        }
    }
}

macro_rules! integer_scalar {
    ($variant:ident, $($ty:ty),+) => {
        $(
            impl Scalar for $ty {
                const KIND: FieldKind = FieldKind::$variant { bits: <$ty>::BITS };

                fn from_native(native: Native) -> Option<Self> {
                    match native {
                        Native::$variant(value) => Self::try_from(value).ok(),
                        _ => None,
                    }
                }
            }
        )+
    };
}

integer_scalar!(Signed, i8, i16, i32, i64, isize);
integer_scalar!(Unsigned, u8, u16, u32, u64, usize);

impl Scalar for f64 {
    const KIND: FieldKind = FieldKind::Float { bits: 64 };

    fn from_native(native: Native) -> Option<Self> {
        match native {
            Native::Float(value) => Some(value),
            _ => None,
        }
    }
}

impl Scalar for f32 {
    const KIND: FieldKind = FieldKind::Float { bits: 32 };

    #[expect(
        clippy::cast_possible_truncation,
        reason = "f32 fields take the IEEE rounding of the parsed f64"
    )]
    fn from_native(native: Native) -> Option<Self> {
        match native {
            Native::Float(value) => Some(value as Self),
            _ => None,
        }
    }
}
