use crate::{hash_merge, Element};

/// Compute the root hash of a merkle tree
///
/// `siblings` is an [`Iterator`] that yields tuples containing the sibling, and a boolean value
/// that indicates whether the node being folded is a right child (`false` means the node is on
/// the left and the sibling on the right, `true` means the sibling is on the left).
///
/// The elements of `siblings` are in "deepest-first" order.
///
/// For a tree of height 2 with leaves `0, 1, 2, 3`:
/// ```text
///            C
///          /   \
///         A     B
///        / \   / \
///       0   1 2   3
/// ```
/// `A` is `hash_merge([0, 1])`, `B` is `hash_merge([2, 3])` and the root `C` is
/// `hash_merge([A, B])`. Proving that `2` sits at index 2 looks like this:
/// ```rust
/// # use zk_primitives::*;
/// let a = hash_merge([Element::new(0), Element::new(1)]);
/// let b = hash_merge([Element::new(2), Element::new(3)]);
/// let c = hash_merge([a, b]);
///
/// let siblings = [
///   (Element::new(3), false),  // 2 is a left child
///   (a, true),                 // B is a right child
/// ];
///
/// let root_hash = compute_merkle_root(Element::new(2), siblings);
/// assert_eq!(root_hash, c);
///
/// // the same path with an empty slot gives a different root
/// let root_hash_if_null = compute_merkle_root(Element::NULL_HASH, siblings);
/// assert_ne!(root_hash_if_null, c);
/// ```
pub fn compute_merkle_root<I: IntoIterator<Item = (Element, bool)>>(
    mut leaf: Element,
    siblings: I,
) -> Element {
    for (sibling, is_right) in siblings {
        leaf = match is_right {
            false => hash_merge([leaf, sibling]),
            true => hash_merge([sibling, leaf]),
        };
    }

    leaf
}
