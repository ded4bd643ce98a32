//! Field annotations: key names plus string options.
//!
//! The derive macro builds an [`Annotation`] for every `#[env(...)]` field.
//! Hand-written [`EnvConfig`](crate::EnvConfig) implementations can parse the
//! same information from a tag string with [`Annotation::parse`].

use std::collections::BTreeMap;

/// Option marking a field as required. Only the literal `"true"` enables it.
pub const OPTION_REQUIRED: &str = "required";
/// Option carrying the default value as a raw string.
pub const OPTION_DEFAULT: &str = "default";

/// Key names and options attached to one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    keys: Vec<String>,
    options: BTreeMap<String, String>,
}

impl Annotation {
    /// Create an annotation with the given key names and no options.
    ///
    /// # Examples
    ///
    /// ```
    /// use envbind::Annotation;
    /// let ann = Annotation::new(["PORT", "HTTP_PORT"]).with_option("default", "8080");
    /// assert_eq!(ann.keys(), ["PORT", "HTTP_PORT"]);
    /// assert_eq!(ann.default_value(), Some("8080"));
    /// ```
    #[must_use]
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            options: BTreeMap::new(),
        }
    }

    /// Parse a tag string such as `"VAR,ALIAS,required=true,default=x"`.
    ///
    /// Segments without `=` are key names; segments with `=` are options,
    /// split at the first `=`. Whitespace around segments is trimmed and
    /// empty key segments are ignored. A repeated option keeps its last value.
    ///
    /// # Examples
    ///
    /// ```
    /// use envbind::Annotation;
    /// let ann = Annotation::parse("REQUIRED_VAR,required=true");
    /// assert_eq!(ann.keys(), ["REQUIRED_VAR"]);
    /// assert!(ann.is_required());
    /// ```
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let mut annotation = Self::default();
        for segment in tag.split(',').map(str::trim) {
            match segment.split_once('=') {
                Some((name, value)) => {
                    annotation
                        .options
                        .insert(name.trim().to_owned(), value.trim().to_owned());
                }
                None if segment.is_empty() => {}
                None => annotation.keys.push(segment.to_owned()),
            }
        }
        annotation
    }

    /// Add or replace an option.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Declared key names in declaration order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Raw value of option `name`.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// Whether the `required` option is the literal string `"true"`.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.option(OPTION_REQUIRED) == Some("true")
    }

    /// The `default` option, treating an empty string as no default.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.option(OPTION_DEFAULT).filter(|value| !value.is_empty())
    }
}
