use crate::{empty_tree_hash, hash_cache::NoopHashCache, Element};

mod error;
mod insert;
mod path;

pub use error::CapacityError;
pub use path::Path;

#[cfg(any(test, feature = "proptest"))]
mod arbitrary_impls;

/// An append-only Merkle tree of height `HEIGHT`
///
/// Leaves are assigned consecutive indices starting at 0, and are never overwritten or removed:
///
/// ```rust
/// # use imt::*;
/// let mut tree = Tree::<8>::new();
///
/// assert_eq!(tree.add_leaf(Element::new(10)).unwrap(), 0);
/// assert_eq!(tree.add_leaf(Element::new(20)).unwrap(), 1);
///
/// assert_eq!(tree.leaf(1), Some(Element::new(20)));
/// assert_eq!(tree.leaf(2), None);
/// ```
#[derive(Debug, Clone)]
pub struct Tree<const HEIGHT: usize, C = NoopHashCache> {
    /// `levels[0]` holds the leaves, `levels[h]` the populated prefix of nodes at height `h`
    ///
    /// Anything beyond the end of a level is an empty subtree
    levels: Vec<Vec<Element>>,
    cache: C,
}

impl<const HEIGHT: usize, C> PartialEq for Tree<HEIGHT, C> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.root_hash() == other.root_hash()
    }
}

impl<const HEIGHT: usize, C> Eq for Tree<HEIGHT, C> {}

impl<const HEIGHT: usize, C> Default for Tree<HEIGHT, C>
where
    C: Default,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<const HEIGHT: usize, C> Tree<HEIGHT, C> {
    /// Creates a new, empty tree
    ///
    /// ```rust
    /// # use imt::*;
    /// let tree = Tree::<8>::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.root_hash(), empty_tree_hash(8));
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self
    where
        C: Default,
    {
        Self::new_with_cache(C::default())
    }

    /// Creates a new, empty tree which uses `cache` to compute node hashes
    ///
    /// ```rust
    /// # use imt::*;
    /// # use imt::hash_cache::*;
    /// let cache = SimpleHashCache::new();
    /// let mut tree = Tree::<8, _>::new_with_cache(cache.clone());
    ///
    /// tree.add_leaf(Element::new(1)).unwrap();
    /// assert_eq!(cache.stats().misses, 8);
    /// ```
    #[inline]
    #[must_use]
    pub fn new_with_cache(cache: C) -> Self {
        Self {
            levels: vec![Vec::new(); HEIGHT + 1],
            cache,
        }
    }

    /// Get access to the inner cache of this tree
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// The number of leaves appended to this tree
    ///
    /// This is also the index that the next call to [`Tree::add_leaf`] will return
    #[inline]
    #[must_use]
    pub fn len(&self) -> u64 {
        self.levels[0].len() as u64
    }

    /// Whether no leaves have been appended to this tree
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels[0].is_empty()
    }

    /// The maximum number of leaves this tree can hold (`2^HEIGHT`)
    ///
    /// Trees of height 64 or more report `u64::MAX`, since they cannot be filled in practice
    ///
    /// ```rust
    /// # use imt::*;
    /// assert_eq!(Tree::<8>::new().capacity(), 256);
    /// assert_eq!(Tree::<0>::new().capacity(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> u64 {
        u32::try_from(HEIGHT)
            .ok()
            .and_then(|height| 1u64.checked_shl(height))
            .unwrap_or(u64::MAX)
    }

    /// The leaf at `index`, if it has been inserted
    #[inline]
    #[must_use]
    pub fn leaf(&self, index: u64) -> Option<Element> {
        let index = usize::try_from(index).ok()?;
        self.levels[0].get(index).copied()
    }

    /// Iterate over the leaves in insertion order
    #[inline]
    pub fn leaves(&self) -> impl Iterator<Item = Element> + '_ {
        self.levels[0].iter().copied()
    }

    /// The root hash of the tree
    ///
    /// This value represents every leaf in the tree and the order they were appended in:
    ///
    /// ```rust
    /// # use imt::*;
    /// let a: Tree<8> = imt! { 1, 2 };
    /// let b: Tree<8> = imt! { 2, 1 };
    /// let c: Tree<8> = imt! { 1, 2, 0 };
    ///
    /// assert_ne!(a.root_hash(), b.root_hash());
    ///
    /// // appending an empty leaf doesn't change the root
    /// assert_eq!(a.root_hash(), c.root_hash());
    /// ```
    /// This value is stored internally, so calls to this function are essentially free
    #[inline]
    #[must_use]
    pub fn root_hash(&self) -> Element {
        self.levels[HEIGHT]
            .first()
            .copied()
            .unwrap_or_else(|| empty_tree_hash(HEIGHT))
    }

    /// The node at `(height, index)`, falling back to the empty subtree hash
    fn node(&self, height: usize, index: usize) -> Element {
        self.levels[height]
            .get(index)
            .copied()
            .unwrap_or_else(|| empty_tree_hash(height))
    }
}

#[cfg(test)]
mod tests {
    use test_strategy::proptest;

    use super::*;
    use crate::hash_cache::SimpleHashCache;

    #[proptest]
    fn same_leaves_same_root(leaves: Vec<Element>) {
        let leaves = &leaves[..leaves.len().min(32)];

        let mut a = Tree::<6>::new();
        let mut b = Tree::<6, SimpleHashCache>::new();

        for leaf in leaves {
            a.add_leaf(*leaf).unwrap();
            b.add_leaf(*leaf).unwrap();
        }

        assert_eq!(a.root_hash(), b.root_hash());
        assert_eq!(a.len(), b.len());

        for i in 0..a.len() {
            let path_a = a.witness(i).unwrap();
            let path_b = b.witness(i).unwrap();
            assert_eq!(path_a.siblings, path_b.siblings);
        }
    }

    #[test]
    fn small_tree_matches_manual_hashing() {
        let tree: Tree<2> = crate::imt! { 1, 2, 3 };

        let left = crate::hash_merge([Element::new(1), Element::new(2)]);
        let right = crate::hash_merge([Element::new(3), Element::NULL_HASH]);

        assert_eq!(tree.root_hash(), crate::hash_merge([left, right]));
    }

    #[test]
    fn height_zero_tree_is_its_leaf() {
        let mut tree = Tree::<0>::new();
        assert_eq!(tree.root_hash(), Element::NULL_HASH);

        tree.add_leaf(Element::new(5)).unwrap();
        assert_eq!(tree.root_hash(), Element::new(5));
        assert!(tree.add_leaf(Element::new(6)).is_err());
    }
}
