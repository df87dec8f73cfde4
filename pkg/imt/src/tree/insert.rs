use crate::{hash_cache::HashCache, CapacityError, Element, Path, Tree};

impl<const HEIGHT: usize, C> Tree<HEIGHT, C>
where
    C: HashCache,
{
    /// Append a leaf to the tree, returning the index it was stored at
    ///
    /// ```rust
    /// # use imt::*;
    /// let mut tree = Tree::<8>::new();
    /// let before = tree.root_hash();
    ///
    /// let index = tree.add_leaf(Element::new(1)).unwrap();
    ///
    /// assert_eq!(index, 0);
    /// assert_eq!(tree.len(), 1);
    /// assert_ne!(tree.root_hash(), before);
    /// ```
    ///
    /// Only the `HEIGHT` nodes between the new leaf and the root are rehashed
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the tree already holds `2^HEIGHT` leaves. The tree is left
    /// unchanged in that case.
    pub fn add_leaf(&mut self, leaf: Element) -> Result<u64, CapacityError> {
        let index = self.len();
        let capacity = self.capacity();

        if index >= capacity {
            tracing::warn!(capacity, "attempted to append to a full merkle tree");
            return Err(CapacityError { capacity });
        }

        self.levels[0].push(leaf);

        let mut position = self.levels[0].len() - 1;
        for height in 1..=HEIGHT {
            let left = self.node(height - 1, position & !1);
            let right = self.node(height - 1, position | 1);
            let parent = self.cache.hash(left, right);

            position >>= 1;
            let level = &mut self.levels[height];
            match level.get_mut(position) {
                Some(node) => *node = parent,
                None => level.push(parent),
            }
        }

        Ok(index)
    }

    /// Append several leaves, returning a [`Path`] for each one, captured straight after it was
    /// appended
    ///
    /// ```rust
    /// # use imt::*;
    /// let mut tree = Tree::<8>::new();
    /// let empty_root = tree.root_hash();
    ///
    /// let paths = tree.insert_with_paths([Element::new(1), Element::new(2)]).unwrap();
    ///
    /// // each path proves that its leaf exists
    /// assert!(paths[0].proves(Element::new(1)));
    /// assert!(paths[1].proves(Element::new(2)));
    ///
    /// // and links the root before the insert to the root after it
    /// assert_eq!(paths[0].compute_root_hash(Element::NULL_HASH), empty_root);
    /// assert_eq!(
    ///     paths[0].compute_root_hash(Element::new(1)),
    ///     paths[1].compute_root_hash(Element::NULL_HASH),
    /// );
    /// assert_eq!(paths[1].actual_root_hash(), tree.root_hash());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if there isn't room for every leaf. Nothing is appended in that
    /// case.
    pub fn insert_with_paths(
        &mut self,
        leaves: impl IntoIterator<Item = Element>,
    ) -> Result<Vec<Path<HEIGHT>>, CapacityError> {
        let leaves: Vec<_> = leaves.into_iter().collect();
        let capacity = self.capacity();

        if self.len().saturating_add(leaves.len() as u64) > capacity {
            return Err(CapacityError { capacity });
        }

        let mut paths = Vec::with_capacity(leaves.len());
        for leaf in leaves {
            let index = self.add_leaf(leaf)?;
            paths.extend(self.witness(index));
        }

        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use test_strategy::proptest;

    use super::*;
    use crate::imt;

    #[test]
    fn full_tree_rejects_leaves() {
        let mut tree = Tree::<2>::new();

        for i in 0..4 {
            assert_eq!(tree.add_leaf(Element::new(i + 1)).unwrap(), i);
        }

        let root = tree.root_hash();
        let error = tree.add_leaf(Element::new(5)).unwrap_err();

        assert_eq!(error, CapacityError { capacity: 4 });
        assert_eq!(tree.root_hash(), root);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn insert_with_paths_is_all_or_nothing() {
        let mut tree: Tree<2> = imt! { 1, 2, 3 };
        let root = tree.root_hash();

        let result = tree.insert_with_paths([Element::new(4), Element::new(5)]);

        assert!(result.is_err());
        assert_eq!(tree.root_hash(), root);
        assert_eq!(tree.len(), 3);
    }

    #[proptest]
    fn insert_with_paths_matches_add_leaf(leaves: [Element; 5]) {
        let mut a = Tree::<8>::new();
        let mut b = Tree::<8>::new();

        let paths = a.insert_with_paths(leaves).unwrap();
        for leaf in leaves {
            b.add_leaf(leaf).unwrap();
        }

        assert_eq!(a, b);
        assert_eq!(paths.len(), 5);
        assert_eq!(paths[4].actual_root_hash(), b.root_hash());
    }
}
