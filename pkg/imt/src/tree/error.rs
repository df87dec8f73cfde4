/// An error returned when a leaf is appended to a [`Tree`] that already holds `2^HEIGHT` leaves
///
/// ```rust
/// # use imt::*;
/// let mut tree: Tree<1> = imt! { 1, 2 };
///
/// let error = tree.add_leaf(Element::new(3)).unwrap_err();
/// assert_eq!(error.capacity, 2);
/// assert_eq!(tree.len(), 2);
/// ```
///
/// [`Tree`]: crate::Tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("merkle tree is full (capacity {capacity})")]
pub struct CapacityError {
    /// The number of leaves the tree can hold
    pub capacity: u64,
}
