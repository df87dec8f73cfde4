use ::proptest::{collection::vec, prelude::*, strategy::Map};

use crate::{
    hash_cache::{HashCache, NoopHashCache, SimpleHashCache},
    Element, Tree,
};

type Leaves = ::proptest::collection::VecStrategy<<Element as Arbitrary>::Strategy>;

/// Generates trees filled with up to `min(capacity, 64)` random leaves
impl<const HEIGHT: usize, C> Arbitrary for Tree<HEIGHT, C>
where
    C: HashCache + Default + core::fmt::Debug,
{
    type Parameters = ();
    type Strategy = Map<Leaves, fn(Vec<Element>) -> Self>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        let max = Tree::<HEIGHT, C>::new().capacity().min(64);
        let max = usize::try_from(max).unwrap_or(64);

        vec(any::<Element>(), 0..=max).prop_map(|leaves| {
            let mut tree = Tree::new();
            for leaf in leaves {
                tree.add_leaf(leaf).unwrap();
            }
            tree
        })
    }
}

impl Arbitrary for NoopHashCache {
    type Parameters = ();
    type Strategy = Just<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        Just(Self)
    }
}

impl Arbitrary for SimpleHashCache {
    type Parameters = ();
    type Strategy = Just<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        Just(Self::default())
    }
}
