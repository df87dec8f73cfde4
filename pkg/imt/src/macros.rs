/// Helper macro to create a [`Tree`] with the given leaves, appended in order
///
/// ```rust
/// # use imt::*;
/// let tree: Tree<8> = imt! {
///   // literals are converted using Element::new, anything else using Element::from
///   123,
///   Element::new(234),
/// };
///
/// assert_eq!(tree.leaf(0), Some(Element::new(123)));
/// assert_eq!(tree.leaf(1), Some(Element::new(234)));
/// ```
///
/// Panics if the leaves don't fit in the tree
///
/// [`Tree`]: crate::Tree
#[macro_export]
macro_rules! imt {
    {} => {{ $crate::Tree::new() }};
    { @push $tree:ident; } => {};
    { @push $tree:ident; $e:literal $(, $($rest:tt)*)? } => {
        $tree.add_leaf($crate::Element::new($e)).unwrap();
        $crate::imt! { @push $tree; $($($rest)*)? }
    };
    { @push $tree:ident; $e:expr $(, $($rest:tt)*)? } => {
        $tree.add_leaf($crate::Element::from($e)).unwrap();
        $crate::imt! { @push $tree; $($($rest)*)? }
    };
    { $($t:tt)+ } => {{
        let mut tree = $crate::Tree::new();
        $crate::imt! { @push tree; $($t)+ }
        tree
    }};
}

#[cfg(test)]
mod tests {
    use zk_primitives::Element;

    use crate::{hash_cache::SimpleHashCache, Tree};

    #[test]
    fn basic_syntax_test() {
        let _t: Tree<8> = imt! {};
        let _t: Tree<8> = imt! { 1 };
        let _t: Tree<8> = imt! { 1, };
        let _t: Tree<8> = imt! { 1, 2 };
        let _t: Tree<8, SimpleHashCache> = imt! { 1, 2, };

        let element = Element::new(1);
        let t: Tree<8> = imt! { element, Element::new(2) };

        assert_eq!(t.len(), 2);
    }
}
