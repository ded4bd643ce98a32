//! Type introspection helpers.
//!
//! Shallow inspection of `syn::Type` values to recognise field types that can
//! never be configuration leaves: standard containers, wrappers and
//! non-path types. Everything else is bound and left to the trait system to
//! accept (scalars, nested structs) or reject at compile time.

use syn::Type;

/// Final path segments of standard containers and wrappers.
const CONTAINERS: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "BinaryHeap",
    "HashMap",
    "BTreeMap",
    "HashSet",
    "BTreeSet",
    "Option",
    "Box",
    "Rc",
    "Arc",
    "Cell",
    "RefCell",
    "PhantomData",
];

/// Returns a display name for `ty` if it cannot be bound.
///
/// The check inspects only the outermost type, so `Option<u16>` and
/// `std::collections::HashMap<K, V>` are both unbindable while a type alias
/// to a container is not recognised.
pub(crate) fn unbindable_container(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(p) if p.qself.is_none() => {
            let last = p.path.segments.last()?;
            let name = last.ident.to_string();
            CONTAINERS.contains(&name.as_str()).then(|| compact(ty))
        }
        Type::Group(g) => unbindable_container(&g.elem),
        Type::Paren(p) => unbindable_container(&p.elem),
        Type::Array(_)
        | Type::Slice(_)
        | Type::Tuple(_)
        | Type::Reference(_)
        | Type::Ptr(_)
        | Type::TraitObject(_)
        | Type::BareFn(_)
        | Type::Never(_) => Some(compact(ty)),
        _ => None,
    }
}

/// Render `ty` without the spacing `quote` inserts around punctuation.
fn compact(ty: &Type) -> String {
    let text = quote::quote!(#ty).to_string();
    let chars: Vec<char> = text.chars().collect();
    let word = |c: Option<&char>| c.is_some_and(|c| c.is_alphanumeric() || *c == '_');
    chars
        .iter()
        .enumerate()
        .filter(|&(i, c)| {
            *c != ' ' || (word(i.checked_sub(1).and_then(|p| chars.get(p))) && word(chars.get(i + 1)))
        })
        .map(|(_, c)| *c)
        .collect()
}
