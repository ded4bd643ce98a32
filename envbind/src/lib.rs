//! Populate configuration structs from environment variables and JSON files.
//!
//! Annotate the fields of a struct with `#[env(...)]` and derive
//! [`EnvConfig`]. Each annotated field is reachable under one or more keys;
//! nested structs prefix their fields' keys with their own key joined by
//! [`KEY_CONNECTOR`]. Values are taken, per key, from the environment first,
//! then from the merged JSON files, then from the declared default.
//!
//! ```
//! use envbind::{EnvConfig, NO_FILES, env_from_entries, unmarshal_map};
//!
//! #[derive(Debug, Default, EnvConfig)]
//! struct Database {
//!     #[env(key = "HOST", default = "localhost")]
//!     host: String,
//!     #[env(key = "PORT", default = 5432)]
//!     port: u16,
//! }
//!
//! #[derive(Debug, Default, EnvConfig)]
//! struct App {
//!     #[env(key = "DEBUG")]
//!     debug: bool,
//!     #[env(key = "DB", key = "DATABASE")]
//!     db: Database,
//! }
//!
//! let env = env_from_entries(["DEBUG=true", "DATABASE_PORT=6432"]);
//! let mut app = App::default();
//! unmarshal_map(&env, &mut app, NO_FILES)?;
//! assert!(app.debug);
//! assert_eq!(app.db.host, "localhost");
//! assert_eq!(app.db.port, 6432);
//! # Ok::<(), envbind::EnvError>(())
//! ```

pub use envbind_macros::EnvConfig;

// Lets derived impls refer to `::envbind` inside this crate's own tests.
extern crate self as envbind;

mod annotation;
mod coerce;
mod error;
mod flatten;
mod resolve;
mod sources;
mod unmarshal;
mod walker;

pub use annotation::{Annotation, OPTION_DEFAULT, OPTION_REQUIRED};
pub use camino::{Utf8Path, Utf8PathBuf};
pub use coerce::{CoerceError, FieldKind, Native, Scalar, coerce};
pub use error::{EnvError, EnvResult};
pub use flatten::{FlatMap, flatten};
pub use resolve::resolve;
pub use sources::{env_from_entries, load_file, load_files, read_env};
pub use unmarshal::{KEY_CONNECTOR, NO_FILES, unmarshal, unmarshal_file, unmarshal_map};
pub use walker::{Bind, Bindings, FieldBinding, Source, StructWalker};

/// Trait implemented by configuration structs.
///
/// Usually derived. A hand-written implementation registers each field with
/// the walker:
///
/// ```
/// use envbind::{Annotation, EnvConfig, NO_FILES, StructWalker, env_from_entries, unmarshal_map};
///
/// #[derive(Default)]
/// struct Limits {
///     burst: u32,
///     label: String,
/// }
///
/// impl EnvConfig for Limits {
///     fn bind_fields<'a>(&'a mut self, walker: &mut StructWalker<'a>) {
///         walker.bind(&mut self.burst, &Annotation::parse("BURST,default=10"));
///         walker.bind(&mut self.label, &Annotation::parse("LABEL,required=true"));
///     }
/// }
///
/// let mut limits = Limits::default();
/// unmarshal_map(&env_from_entries(["LABEL=edge"]), &mut limits, NO_FILES)?;
/// assert_eq!(limits.burst, 10);
/// assert_eq!(limits.label, "edge");
/// # Ok::<(), envbind::EnvError>(())
/// ```
pub trait EnvConfig {
    /// Register every annotated field with `walker`, in declaration order.
    fn bind_fields<'a>(&'a mut self, walker: &mut StructWalker<'a>);

    /// Build a default value and populate it from the process environment
    /// and `paths`.
    ///
    /// # Errors
    ///
    /// See [`unmarshal_map`].
    fn load<P>(paths: &[P]) -> EnvResult<Self>
    where
        Self: Default + Sized,
        P: AsRef<Utf8Path>,
    {
        Self::load_from_map(&read_env(), paths)
    }

    /// Build a default value and populate it from `env` and `paths`.
    ///
    /// # Errors
    ///
    /// See [`unmarshal_map`].
    fn load_from_map<P>(env: &FlatMap, paths: &[P]) -> EnvResult<Self>
    where
        Self: Default + Sized,
        P: AsRef<Utf8Path>,
    {
        let mut config = Self::default();
        unmarshal_map(env, &mut config, paths)?;
        Ok(config)
    }
}
