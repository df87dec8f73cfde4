use rand::{CryptoRng, RngCore};
use zk_primitives::{hash_merge, Element};

use crate::{Note, NoteWithMeta};

/// The public owner key for a spending key
///
/// ```rust
/// # use join_split::*;
/// # use zk_primitives::hash_merge;
/// let spending_key = Element::new(1234);
/// assert_eq!(owner_key_for(spending_key), hash_merge([spending_key, Element::ZERO]));
/// ```
#[inline]
#[must_use]
pub fn owner_key_for(spending_key: Element) -> Element {
    hash_merge([spending_key, Element::ZERO])
}

impl Note {
    /// Create a note of `amount` for `owner_key` with a fresh random blinding
    pub fn new(owner_key: Element, amount: u64, rng: impl RngCore + CryptoRng) -> Self {
        Self::restore(owner_key, Element::new(amount), Element::secure_random(rng))
    }

    /// A zero-amount note, used to fill unused input and output slots
    ///
    /// Padding notes are ordinary notes, so the blinding is still random and every padding note
    /// gets a distinct commitment and nullifier
    pub fn padding(owner_key: Element, rng: impl RngCore + CryptoRng) -> Self {
        Self::new(owner_key, 0, rng)
    }

    /// Rebuild a note from its parts
    #[must_use]
    pub fn restore(owner_key: Element, amount: Element, blinding: Element) -> Self {
        Self {
            owner_key,
            amount,
            blinding,
        }
    }

    /// The commitment for this note, the value stored as a leaf in the tree
    ///
    /// ```rust
    /// # use join_split::*;
    /// let mut rng = rand::thread_rng();
    /// let owner = owner_key_for(Element::new(1));
    ///
    /// let a = Note::new(owner, 100, &mut rng);
    /// let b = Note::new(owner, 100, &mut rng);
    ///
    /// // same owner and amount, but a different blinding
    /// assert_ne!(a.commitment(), b.commitment());
    /// ```
    #[must_use]
    pub fn commitment(&self) -> Element {
        hash_merge([self.amount, self.blinding, self.owner_key])
    }

    /// The nullifier for this note when stored at `leaf_index`
    ///
    /// The leaf index is part of the hash, so two identical notes stored at different positions
    /// can each be spent once:
    ///
    /// ```rust
    /// # use join_split::*;
    /// let spending_key = Element::new(1);
    /// let note = Note::restore(owner_key_for(spending_key), Element::new(5), Element::new(9));
    ///
    /// assert_ne!(note.nullifier(0, spending_key), note.nullifier(1, spending_key));
    /// ```
    #[must_use]
    pub fn nullifier(&self, leaf_index: u64, spending_key: Element) -> Element {
        hash_merge([self.commitment(), Element::new(leaf_index), spending_key])
    }

    /// Attach the values derived from this note's position in the tree
    #[must_use]
    pub fn with_meta(&self, leaf_index: u64, spending_key: Element) -> NoteWithMeta {
        NoteWithMeta {
            note: *self,
            leaf_index,
            commitment: self.commitment(),
            nullifier: self.nullifier(leaf_index, spending_key),
        }
    }

    /// Whether this note carries no value
    #[inline]
    #[must_use]
    pub fn is_padding(&self) -> bool {
        self.amount.is_zero()
    }

    /// The amount of this note, if it is in the range `0..=MAX_NOTE_VALUE`
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<u64> {
        self.amount.to_u64()
    }
}

impl NoteWithMeta {
    /// The amount of the note, treating out-of-range amounts as zero
    #[inline]
    #[must_use]
    pub fn value(&self) -> u64 {
        self.note.value().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

    use super::*;

    #[test]
    fn commitment_binds_every_field() {
        let note = Note::restore(Element::new(1), Element::new(2), Element::new(3));

        let other_owner = Note::restore(Element::new(4), Element::new(2), Element::new(3));
        let other_amount = Note::restore(Element::new(1), Element::new(4), Element::new(3));
        let other_blinding = Note::restore(Element::new(1), Element::new(2), Element::new(4));

        assert_ne!(note.commitment(), other_owner.commitment());
        assert_ne!(note.commitment(), other_amount.commitment());
        assert_ne!(note.commitment(), other_blinding.commitment());

        assert_eq!(
            note.commitment(),
            hash_merge([Element::new(2), Element::new(3), Element::new(1)])
        );
    }

    #[test]
    fn nullifier_depends_on_spending_key() {
        let note = Note::restore(Element::new(1), Element::new(2), Element::new(3));

        assert_ne!(
            note.nullifier(0, Element::new(10)),
            note.nullifier(0, Element::new(11))
        );
    }

    #[test]
    fn padding_notes_are_distinct() {
        let mut rng = ChaChaRng::from_seed([0; 32]);
        let owner = owner_key_for(Element::new(7));

        let a = Note::padding(owner, &mut rng);
        let b = Note::padding(owner, &mut rng);

        assert!(a.is_padding());
        assert!(b.is_padding());
        assert_ne!(a.commitment(), b.commitment());
        assert_ne!(a.nullifier(0, Element::new(7)), b.nullifier(0, Element::new(7)));
    }

    #[test]
    fn with_meta_matches_derived_values() {
        let mut rng = ChaChaRng::from_seed([1; 32]);
        let spending_key = Element::secure_random(&mut rng);
        let note = Note::new(owner_key_for(spending_key), 1500, &mut rng);

        let meta = note.with_meta(3, spending_key);

        assert_eq!(meta.commitment, note.commitment());
        assert_eq!(meta.nullifier, note.nullifier(3, spending_key));
        assert_eq!(meta.value(), 1500);
    }

    #[test]
    fn serde_note() {
        let note = Note::restore(Element::new(1), Element::new(100), Element::new(3));

        let json = serde_json::to_string(&note).unwrap();
        let note_again: Note = serde_json::from_str(&json).unwrap();

        assert_eq!(note, note_again);
    }
}
