//! Struct walking: turning a configuration struct into keyed field bindings.
//!
//! A [`StructWalker`] visits the fields a type registers through
//! [`EnvConfig::bind_fields`](crate::EnvConfig::bind_fields). Scalars become
//! [`FieldBinding`]s registered under every declared key name; nested
//! structs are walked recursively and their keys prefixed with the parent's
//! key names joined by the connector.

use std::collections::HashMap;

use crate::EnvConfig;
use crate::annotation::Annotation;
use crate::error::{EnvError, EnvResult};

mod binding;

pub use binding::{FieldBinding, Source};


/// Flat mapping from fully-qualified key to field binding.
///
/// Bindings are stored once each; keys refer to them by position, so several
/// aliases can share one binding. Keys iterate in registration order.
#[derive(Debug, Default)]
pub struct Bindings<'a> {
    slots: Vec<FieldBinding<'a>>,
    keys: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
    skipped: Vec<String>,
}

impl<'a> Bindings<'a> {
    fn push(&mut self, binding: FieldBinding<'a>) -> usize {
        self.slots.push(binding);
        self.slots.len() - 1
    }

    /// Point `key` at binding `slot`. An existing key is re-pointed in place
    /// (last write wins).
    fn insert(&mut self, key: String, slot: usize) {
        if let Some(&pos) = self.positions.get(&key) {
            if let Some(entry) = self.keys.get_mut(pos) {
                entry.1 = slot;
            }
            return;
        }
        self.positions.insert(key.clone(), self.keys.len());
        self.keys.push((key, slot));
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no key was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of distinct field bindings.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.slots.len()
    }

    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|(key, _)| key.as_str())
    }

    /// Binding reachable under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldBinding<'a>> {
        let pos = self.positions.get(key)?;
        let (_, slot) = self.keys.get(*pos)?;
        self.slots.get(*slot)
    }

    /// Whether `a` and `b` reach the same field.
    #[must_use]
    pub fn same_field(&self, a: &str, b: &str) -> bool {
        match (self.slot_of(a), self.slot_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    fn slot_of(&self, key: &str) -> Option<usize> {
        let pos = self.positions.get(key)?;
        self.keys.get(*pos).map(|(_, slot)| *slot)
    }

    /// Names of fields that were skipped because their type cannot be bound.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Every key that reaches binding `slot`, in registration order.
    pub(crate) fn aliases(&self, slot: usize) -> Vec<String> {
        self.keys
            .iter()
            .filter(|(_, s)| *s == slot)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Split into the ordered key list and the binding arena.
    pub(crate) fn parts_mut(&mut self) -> (&[(String, usize)], &mut [FieldBinding<'a>]) {
        (&self.keys, &mut self.slots)
    }

    /// Move every binding of `child` into `self`, re-keying each child key as
    /// `prefix + connector + key` for every prefix.
    fn absorb(&mut self, child: Self, prefixes: &[String], connector: &str) {
        let offset = self.slots.len();
        let Self {
            slots,
            keys,
            skipped,
            ..
        } = child;
        self.slots.extend(slots);
        self.skipped.extend(skipped);
        for prefix in prefixes {
            for (key, slot) in &keys {
                self.insert(format!("{prefix}{connector}{key}"), slot + offset);
            }
        }
    }
}

/// Types that can appear as a field of a configuration struct, or as the
/// top-level target.
///
/// Implemented for every [`Scalar`](crate::Scalar) and for every [`EnvConfig`] struct.
pub trait Bind {
    /// Register `self` with `walker` under `annotation`'s key names.
    fn bind_into<'a>(&'a mut self, walker: &mut StructWalker<'a>, annotation: &Annotation);

    /// Walk `self` as the top-level target.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::TargetNotStruct`] when `self` is not a struct.
    fn walk_root<'a>(&'a mut self, connector: &str) -> EnvResult<Bindings<'a>>;
}

impl<T: EnvConfig> Bind for T {
    fn bind_into<'a>(&'a mut self, walker: &mut StructWalker<'a>, annotation: &Annotation) {
        walker.nest(self, annotation);
    }

    fn walk_root<'a>(&'a mut self, connector: &str) -> EnvResult<Bindings<'a>> {
        Ok(StructWalker::walk(self, connector))
    }
}

macro_rules! scalar_bind {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Bind for $ty {
                fn bind_into<'a>(&'a mut self, walker: &mut StructWalker<'a>, annotation: &Annotation) {
                    walker.register(FieldBinding::scalar(self, annotation), annotation);
                }

                fn walk_root<'a>(&'a mut self, _connector: &str) -> EnvResult<Bindings<'a>> {
                    Err(EnvError::TargetNotStruct {
                        actual: std::any::type_name::<Self>(),
                    })
                }
            }
        )+
    };
}

scalar_bind!(
    bool, String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
);

/// Collects the bindings of one struct.
#[derive(Debug)]
pub struct StructWalker<'a> {
    connector: String,
    bindings: Bindings<'a>,
}

impl<'a> StructWalker<'a> {
    /// Walk `target`, returning its flat key-to-binding mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use envbind::{EnvConfig, KEY_CONNECTOR, StructWalker};
    ///
    /// #[derive(Default, EnvConfig)]
    /// struct Db {
    ///     #[env(key = "HOST")]
    ///     host: String,
    /// }
    ///
    /// #[derive(Default, EnvConfig)]
    /// struct App {
    ///     #[env(key = "DB")]
    ///     db: Db,
    /// }
    ///
    /// let mut app = App::default();
    /// let bindings = StructWalker::walk(&mut app, KEY_CONNECTOR);
    /// assert_eq!(bindings.keys().collect::<Vec<_>>(), ["DB_HOST"]);
    /// ```
    pub fn walk<C: EnvConfig + ?Sized>(target: &'a mut C, connector: &str) -> Bindings<'a> {
        let mut walker = Self {
            connector: connector.to_owned(),
            bindings: Bindings::default(),
        };
        target.bind_fields(&mut walker);
        walker.bindings
    }

    /// Bind a field, dispatching on whether it is a scalar or a struct.
    pub fn bind<T: Bind + ?Sized>(&mut self, field: &'a mut T, annotation: &Annotation) {
        field.bind_into(self, annotation);
    }

    /// Register a scalar binding under every key of `annotation`.
    pub fn register(&mut self, binding: FieldBinding<'a>, annotation: &Annotation) {
        let slot = self.bindings.push(binding);
        for key in annotation.keys() {
            self.bindings.insert(key.clone(), slot);
        }
    }

    /// Walk a nested struct and merge its keys under `annotation`'s names.
    pub fn nest<C: EnvConfig + ?Sized>(&mut self, child: &'a mut C, annotation: &Annotation) {
        let sub = Self::walk(child, &self.connector);
        self.bindings.absorb(sub, annotation.keys(), &self.connector);
    }

    /// Record a field whose type cannot be bound.
    ///
    /// Sequences, maps, options and references are not configuration leaves;
    /// they are skipped without error.
    pub fn skip(&mut self, field: &str, type_name: &str) {
        tracing::debug!(field, type_name, "skipping field with unsupported type");
        self.bindings.skipped.push(field.to_owned());
    }
}
