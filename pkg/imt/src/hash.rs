use std::sync::OnceLock;

use crate::Element;

const COMPUTE_HEIGHT: usize = 64;

/// The hash of an empty subtree with a given height
///
/// This function can be defined recursively:
///  - `empty_tree_hash(0) = Element::NULL_HASH` (a single empty leaf)
///  - `empty_tree_hash(n) = hash_merge(empty_tree_hash(n - 1), empty_tree_hash(n - 1))`
///
/// ```rust
/// # use imt::*;
/// assert_eq!(empty_tree_hash(0), Element::NULL_HASH);
/// assert_eq!(
///     empty_tree_hash(1),
///     hash_merge([Element::NULL_HASH, Element::NULL_HASH]),
/// );
/// ```
///
/// The first 64 heights are computed once and cached, so calls are essentially free after the
/// initial setup is completed.
#[inline]
#[must_use]
pub fn empty_tree_hash(height: usize) -> Element {
    get_cache()
        .get(height)
        .copied()
        .unwrap_or_else(|| fallback(height))
}

fn fallback(height: usize) -> Element {
    match height {
        0..=COMPUTE_HEIGHT => get_cache()[height],
        other => {
            tracing::warn!(height = other, "using slow fallback for `empty_tree_hash`");
            let hash = fallback(other - 1);
            crate::hash_merge([hash, hash])
        }
    }
}

fn get_cache() -> &'static [Element] {
    static CACHE: OnceLock<Vec<Element>> = OnceLock::new();

    CACHE.get_or_init(|| {
        let mut vec = Vec::with_capacity(COMPUTE_HEIGHT + 1);
        let mut hash = Element::NULL_HASH;
        vec.push(hash);

        for _ in 0..COMPUTE_HEIGHT {
            hash = crate::hash_merge([hash, hash]);
            vec.push(hash);
        }

        vec
    })
}
