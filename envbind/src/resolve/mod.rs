//! Priority resolution of environment, file and default values.
//!
//! Resolution runs two passes over the keys of a [`Bindings`] map, in
//! registration order:
//!
//! 1. The primary pass assigns the environment value for a key when present,
//!    otherwise the file value, unless another alias of the same binding was
//!    already satisfied from the environment.
//! 2. The fallback pass visits bindings no layer satisfied. Required
//!    bindings are noted as missing; the rest take their default or keep
//!    their initial value.
//!
//! A missing required binding fails the call once the fallback pass has
//! finished, so every default is applied before the error is returned. The
//! first missing binding in registration order is the one reported.
//! Conversion failures abort immediately.

use crate::error::{EnvError, EnvResult};
use crate::flatten::FlatMap;
use crate::walker::{Bindings, Source};


/// Merge `env`, `file` and declared defaults into the bound fields.
///
/// # Errors
///
/// - [`EnvError::Coerce`] or [`EnvError::UnsupportedFieldType`] when a value
///   does not convert; fields assigned earlier keep their new values.
/// - [`EnvError::RequiredKeyNotPresent`] for the first unsatisfied required
///   field, carrying all of its alias keys.
pub fn resolve(bindings: &mut Bindings<'_>, env: &FlatMap, file: &FlatMap) -> EnvResult<()> {
    primary_pass(bindings, env, file)?;
    fallback_pass(bindings)?.map_or(Ok(()), |slot| {
        Err(EnvError::RequiredKeyNotPresent {
            keys: bindings.aliases(slot),
        })
    })
}

fn primary_pass(bindings: &mut Bindings<'_>, env: &FlatMap, file: &FlatMap) -> EnvResult<()> {
    let (keys, slots) = bindings.parts_mut();
    for (key, slot) in keys {
        let Some(binding) = slots.get_mut(*slot) else {
            continue;
        };
        if let Some(raw) = env.get(key) {
            binding.assign(key, raw, Source::Env)?;
        } else if let Some(raw) = file.get(key) {
            if binding.source() != Source::Env {
                binding.assign(key, raw, Source::File)?;
            }
        }
    }
    Ok(())
}

/// Returns the arena position of the first unsatisfied required binding.
fn fallback_pass(bindings: &mut Bindings<'_>) -> EnvResult<Option<usize>> {
    let mut missing = None;
    let (keys, slots) = bindings.parts_mut();
    for (key, slot) in keys {
        let Some(binding) = slots.get_mut(*slot) else {
            continue;
        };
        if binding.source().is_satisfied() {
            continue;
        }
        if binding.is_required() {
            if missing.is_none() {
                missing = Some(*slot);
            }
            continue;
        }
        binding.apply_default(key)?;
    }
    Ok(missing)
}
