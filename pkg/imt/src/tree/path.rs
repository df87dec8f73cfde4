use std::iter::zip;

use crate::{Element, Tree};

/// A Merkle path generated from a [`Tree`] with height `HEIGHT`
///
/// A path proves that a given [`Element`] sits at a given index in a tree with a known root hash.
/// It holds exactly `HEIGHT` siblings, deepest first, and the root hash of the tree at the moment
/// the path was created.
///
/// ```rust
/// # use imt::*;
/// let tree: Tree<8> = imt! { 1, 2, 3, 4, 5 };
///
/// let path = tree.witness(2).unwrap();
///
/// // the path stores the root hash of the tree from which it was created
/// assert_eq!(path.actual_root_hash(), tree.root_hash());
///
/// // you can compute "what the root hash would have been" for a given leaf
/// assert_eq!(path.compute_root_hash(Element::new(3)), tree.root_hash());
/// assert_ne!(path.compute_root_hash(Element::new(4)), tree.root_hash());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<const HEIGHT: usize> {
    /// The position of the leaf this path was generated for
    pub index: u64,

    /// The siblings of the leaf, deepest first
    pub siblings: [Element; HEIGHT],

    pub(crate) root_hash: Element,
}

impl<const HEIGHT: usize> Path<HEIGHT> {
    /// The path of the first slot in an empty tree
    ///
    /// Every sibling is an empty subtree, so this path proves [`Element::NULL_HASH`] against
    /// [`empty_tree_hash(HEIGHT)`][crate::empty_tree_hash]
    ///
    /// ```rust
    /// # use imt::*;
    /// let path = Path::<8>::empty();
    /// assert!(path.proves(Element::NULL_HASH));
    /// assert_eq!(path.actual_root_hash(), Tree::<8>::new().root_hash());
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self {
            index: 0,
            siblings: core::array::from_fn(crate::empty_tree_hash),
            root_hash: crate::empty_tree_hash(HEIGHT),
        }
    }

    /// The position of the leaf in the tree
    ///
    /// The bits of the index are the left/right choices made while walking from the leaf to the
    /// root, least significant bit first
    #[inline]
    #[must_use]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Get a slice of siblings in this path, deepest first
    ///
    /// ```rust
    /// # use imt::*;
    /// let tree: Tree<8> = imt! { 1 };
    /// let path = tree.witness(0).unwrap();
    /// assert_eq!(path.siblings_deepest_first().len(), 8);
    /// ```
    #[inline]
    #[must_use]
    pub fn siblings_deepest_first(&self) -> &[Element] {
        &self.siblings
    }

    /// Check whether this [`Path`] proves the existence of the given leaf
    ///
    /// This is a small helper that simply compares the output of [`Self::compute_root_hash`] and
    /// [`Self::actual_root_hash`]
    ///
    /// ```rust
    /// # use imt::*;
    /// let tree: Tree<8> = imt! { 1, 2, 3 };
    ///
    /// let path_for_2 = tree.witness(1).unwrap();
    ///
    /// assert_eq!(path_for_2.proves(Element::new(2)), true);
    /// assert_eq!(path_for_2.proves(Element::new(1)), false);
    /// assert_eq!(path_for_2.proves(Element::NULL_HASH), false);
    /// ```
    #[inline]
    #[must_use]
    pub fn proves(&self, leaf: Element) -> bool {
        self.compute_root_hash(leaf) == self.actual_root_hash()
    }

    /// Compute the root hash of the tree from this path, with the given leaf in the
    /// corresponding slot
    ///
    /// Internally, this function calls [`zk_primitives::compute_merkle_root`]. See the docs for
    /// that function for more details
    #[must_use]
    pub fn compute_root_hash(&self, leaf: Element) -> Element {
        let bits = (0..HEIGHT).map(|height| {
            u32::try_from(height)
                .ok()
                .and_then(|height| self.index.checked_shr(height))
                .is_some_and(|shifted| shifted & 1 == 1)
        });
        let siblings = self.siblings.iter().copied();

        zk_primitives::compute_merkle_root(leaf, zip(siblings, bits))
    }

    /// The root hash of the tree when this path was created
    #[inline]
    #[must_use]
    pub fn actual_root_hash(&self) -> Element {
        self.root_hash
    }
}

impl<const HEIGHT: usize, C> Tree<HEIGHT, C> {
    /// Generate a [`Path`] for the leaf at `index`
    ///
    /// Returns `None` if no leaf has been appended at `index` yet
    ///
    /// ```rust
    /// # use imt::*;
    /// let tree: Tree<8> = imt! { 10, 20 };
    ///
    /// let path = tree.witness(1).unwrap();
    /// assert_eq!(path.index(), 1);
    /// assert!(path.proves(Element::new(20)));
    ///
    /// assert!(tree.witness(2).is_none());
    /// ```
    ///
    /// Later appends change the root hash of the tree, but the path still proves its leaf against
    /// [`Path::actual_root_hash`]
    #[must_use]
    pub fn witness(&self, index: u64) -> Option<Path<HEIGHT>> {
        if index >= self.len() {
            return None;
        }

        let position = usize::try_from(index).ok()?;
        let siblings = core::array::from_fn(|height| self.node(height, (position >> height) ^ 1));

        Some(Path {
            index,
            siblings,
            root_hash: self.root_hash(),
        })
    }
}

#[cfg(test)]
mod tests {
    use test_strategy::proptest;

    use super::*;

    #[proptest]
    fn every_leaf_has_a_valid_witness(tree: Tree<6>) {
        for (index, leaf) in tree.leaves().enumerate() {
            let path = tree.witness(index as u64).unwrap();

            assert_eq!(path.actual_root_hash(), tree.root_hash());
            assert!(path.proves(leaf));
            assert_eq!(path.index(), index as u64);
        }
    }

    #[proptest]
    fn old_witness_survives_appends(tree: Tree<6>, extra: Element) {
        let mut tree = tree;

        if let (Some(path), Some(first)) = (tree.witness(0), tree.leaf(0)) {
            if tree.add_leaf(extra).is_ok() {
                assert!(path.proves(first));
                assert!(tree.witness(0).unwrap().proves(first));
            }
        }
    }

    #[test]
    fn path_of_next_slot_proves_empty_leaf() {
        let mut tree: Tree<4> = crate::imt! { 1, 2, 3 };
        let before = tree.root_hash();

        let index = tree.add_leaf(Element::new(4)).unwrap();
        let path = tree.witness(index).unwrap();

        assert_eq!(path.compute_root_hash(Element::NULL_HASH), before);
        assert!(path.proves(Element::new(4)));
    }
}
