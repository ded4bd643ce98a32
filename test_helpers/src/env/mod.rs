//! Helpers for safely mutating environment variables in tests.
//!
//! Every mutation takes a global re-entrant mutex and returns an RAII guard
//! that restores the previous state (removing the variable if it was absent)
//! when dropped. Guards for the same key stack and restore in LIFO order.
//!
//! Tests that read the environment as a whole, such as those calling
//! `envbind::read_env`, should hold an [`EnvScope`] so no other helper mutates
//! variables underneath them.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("ENVBIND_DOC_KEY", "VALUE");
//! assert_eq!(std::env::var("ENVBIND_DOC_KEY").as_deref(), Ok("VALUE"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Apply `value` to `key`, removing the variable when `value` is `None`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn write_var(key: &str, value: Option<&OsStr>) {
    match value {
        Some(v) => unsafe { env::set_var(key, v) },
        None => unsafe { env::remove_var(key) },
    }
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    fn apply(key: String, value: Option<&OsStr>) -> Self {
        let _guard = ENV_MUTEX.lock();
        let original = env::var_os(&key);
        // SAFETY: `ENV_MUTEX` is held.
        unsafe { write_var(&key, value) };
        Self { key, original }
    }

    /// Name of the guarded variable.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        // SAFETY: `ENV_MUTEX` is held.
        unsafe { write_var(&self.key, self.original.as_deref()) };
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use test_helpers::env;
/// let _g = env::set_var("ENVBIND_DOC_SET", "bar");
/// assert!(matches!(std::env::var("ENVBIND_DOC_SET"), Ok(ref value) if value == "bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    EnvVarGuard::apply(key.into(), Some(value.as_ref()))
}

/// Removes an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use test_helpers::env;
/// let _g = env::remove_var("ENVBIND_DOC_REMOVED");
/// assert!(std::env::var("ENVBIND_DOC_REMOVED").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    EnvVarGuard::apply(key.into(), None)
}

/// RAII scope holding the environment lock and a set of guards.
///
/// The lock is held until the scope drops, after which every guard restores
/// its variable in reverse order of creation.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl EnvScope {
    /// Keys guarded by this scope, in creation order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.guards.iter().map(EnvVarGuard::key)
    }
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

/// Set or remove several variables under one held lock.
///
/// Pairs with a `None` value remove the variable. The returned scope keeps
/// other helpers from mutating the environment until it drops.
///
/// # Examples
/// ```
/// use test_helpers::env;
///
/// let scope = env::scope([
///     ("ENVBIND_DOC_HOST", Some("localhost")),
///     ("ENVBIND_DOC_PORT", None),
/// ]);
/// assert_eq!(std::env::var("ENVBIND_DOC_HOST").as_deref(), Ok("localhost"));
/// assert!(std::env::var("ENVBIND_DOC_PORT").is_err());
/// drop(scope);
/// assert!(std::env::var("ENVBIND_DOC_HOST").is_err());
/// ```
pub fn scope<I, K, V>(vars: I) -> EnvScope
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let lock = ENV_MUTEX.lock();
    let guards = vars
        .into_iter()
        .map(|(key, value)| EnvVarGuard::apply(key.into(), value.as_ref().map(V::as_ref)))
        .collect();
    EnvScope {
        guards,
        _lock: lock,
    }
}

/// Run a closure while holding the global environment lock.
///
/// # Examples
/// ```
/// use test_helpers::env;
///
/// let seen = env::with_lock(|| {
///     let _guard = env::set_var("ENVBIND_DOC_LOCKED", "1");
///     std::env::var("ENVBIND_DOC_LOCKED").ok()
/// });
/// assert_eq!(seen.as_deref(), Some("1"));
/// ```
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock();
    f()
}
