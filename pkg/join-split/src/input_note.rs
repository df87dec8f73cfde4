use imt::Path;
use rand::{CryptoRng, RngCore};
use zk_primitives::Element;

use crate::{owner_key_for, InputNote, Note, OutputNote};

impl<const HEIGHT: usize> InputNote<HEIGHT> {
    pub fn new(note: Note, spending_key: Element, path: Path<HEIGHT>) -> Self {
        Self {
            note,
            spending_key,
            path,
        }
    }

    /// A zero-amount input owned by `spending_key`
    ///
    /// Padding inputs don't have to be in the tree, so they use the path of the first slot of an
    /// empty tree
    pub fn padding(spending_key: Element, rng: impl RngCore + CryptoRng) -> Self {
        let note = Note::padding(owner_key_for(spending_key), rng);
        Self::new(note, spending_key, Path::empty())
    }

    #[inline]
    #[must_use]
    pub fn is_padding(&self) -> bool {
        self.note.is_padding()
    }

    /// The nullifier for this input, bound to the leaf index its path proves
    #[must_use]
    pub fn nullifier(&self) -> Element {
        self.note.nullifier(self.path.index(), self.spending_key)
    }

    /// The root this input's path produces for its note
    #[must_use]
    pub fn recent_root(&self) -> Element {
        self.path.compute_root_hash(self.note.commitment())
    }
}

impl<const HEIGHT: usize> OutputNote<HEIGHT> {
    pub fn new(note: Note, path: Path<HEIGHT>) -> Self {
        Self { note, path }
    }

    /// The root before this output was appended
    #[must_use]
    pub fn root_before(&self) -> Element {
        self.path.compute_root_hash(Element::NULL_HASH)
    }

    /// The root after this output was appended
    #[must_use]
    pub fn root_after(&self) -> Element {
        self.path.compute_root_hash(self.note.commitment())
    }
}

#[cfg(test)]
mod tests {
    use imt::Tree;
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

    use super::*;

    #[test]
    fn input_nullifier_uses_path_index() {
        let mut rng = ChaChaRng::from_seed([2; 32]);
        let spending_key = Element::secure_random(&mut rng);
        let note = Note::new(owner_key_for(spending_key), 10, &mut rng);

        let mut tree = Tree::<4>::new();
        tree.add_leaf(Element::new(99)).unwrap();
        let index = tree.add_leaf(note.commitment()).unwrap();

        let input = InputNote::new(note, spending_key, tree.witness(index).unwrap());

        assert_eq!(input.nullifier(), note.nullifier(1, spending_key));
        assert_eq!(input.recent_root(), tree.root_hash());
    }

    #[test]
    fn output_roots_link() {
        let mut rng = ChaChaRng::from_seed([3; 32]);
        let note = Note::new(Element::new(1), 10, &mut rng);

        let mut tree = Tree::<4>::new();
        let before = tree.root_hash();
        let index = tree.add_leaf(note.commitment()).unwrap();

        let output = OutputNote::new(note, tree.witness(index).unwrap());

        assert_eq!(output.root_before(), before);
        assert_eq!(output.root_after(), tree.root_hash());
    }
}
