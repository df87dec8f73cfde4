use std::collections::HashSet;

use imt::{hash_cache::SimpleHashCache, Tree};
use join_split::{owner_key_for, Note, NoteWithMeta, PoolEvent, MERKLE_TREE_HEIGHT, UTXO_INPUTS};
use rand::{CryptoRng, RngCore};
use zk_primitives::Element;

use crate::{select_notes, Built, Error, Result, TxBuilder};

/// A spending key, the notes it owns, and a local copy of the commitment tree
///
/// The local tree must see the same commitments in the same order as the pool, otherwise proofs
/// built from it are rejected with a root mismatch
#[derive(Debug, Clone)]
pub struct Wallet<const HEIGHT: usize = MERKLE_TREE_HEIGHT> {
    spending_key: Element,
    notes: Vec<NoteWithMeta>,
    spent: HashSet<Element>,
    pub(crate) tree: Tree<HEIGHT, SimpleHashCache>,
}

impl<const HEIGHT: usize> Wallet<HEIGHT> {
    pub fn new(spending_key: Element) -> Self {
        Self::with_cache(spending_key, SimpleHashCache::new())
    }

    /// A wallet that shares node hashes with other trees using the same cache
    pub fn with_cache(spending_key: Element, cache: SimpleHashCache) -> Self {
        Self {
            spending_key,
            notes: Vec::new(),
            spent: HashSet::new(),
            tree: Tree::new_with_cache(cache),
        }
    }

    /// A wallet with a fresh random spending key
    pub fn random(rng: impl RngCore + CryptoRng) -> Self {
        Self::new(Element::secure_random(rng))
    }

    #[must_use]
    pub fn spending_key(&self) -> Element {
        self.spending_key
    }

    /// The key other wallets send notes to
    #[must_use]
    pub fn owner_key(&self) -> Element {
        owner_key_for(self.spending_key)
    }

    #[must_use]
    pub fn tree(&self) -> &Tree<HEIGHT, SimpleHashCache> {
        &self.tree
    }

    #[must_use]
    pub fn root_hash(&self) -> Element {
        self.tree.root_hash()
    }

    /// Record a note this wallet owns, stored at `index` in the pool's tree
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotOwner`] if the note belongs to another key
    pub fn add_note(&mut self, index: u64, note: Note) -> Result<NoteWithMeta> {
        if note.owner_key != self.owner_key() {
            return Err(Error::NotOwner { index });
        }

        let meta = note.with_meta(index, self.spending_key);
        if !self.notes.iter().any(|known| known.nullifier == meta.nullifier) {
            tracing::debug!(index, commitment = %meta.commitment, "recording note");
            self.notes.push(meta);
        }

        Ok(meta)
    }

    /// Mark a nullifier as spent
    ///
    /// Returns `true` if the nullifier wasn't already known
    pub fn add_nullifier(&mut self, nullifier: Element) -> bool {
        self.spent.insert(nullifier)
    }

    /// Learn spent nullifiers from every event named `filter_name`, returning how many were new
    pub fn consume_events<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a PoolEvent>,
        filter_name: &str,
    ) -> usize {
        let learned = events
            .into_iter()
            .filter(|event| event.name == filter_name)
            .filter(|event| self.add_nullifier(event.nullifier))
            .count();

        tracing::debug!(learned, filter_name, "consumed pool events");
        learned
    }

    /// All recorded notes, spent or not, in the order they were recorded
    #[must_use]
    pub fn notes(&self) -> &[NoteWithMeta] {
        &self.notes
    }

    /// Recorded notes whose nullifier hasn't been seen spent
    pub fn unspent_notes(&self) -> impl Iterator<Item = &NoteWithMeta> + '_ {
        self.notes
            .iter()
            .filter(|note| !self.spent.contains(&note.nullifier))
    }

    /// The total value of the unspent notes
    #[must_use]
    pub fn balance(&self) -> u128 {
        self.unspent_notes().map(|note| u128::from(note.value())).sum()
    }

    /// Select unspent notes covering `target`, see [`select_notes`]
    pub fn notes_up_to(&self, target: u64) -> Result<Vec<NoteWithMeta>> {
        select_notes(self.unspent_notes(), target, UTXO_INPUTS)
    }

    /// Append a commitment that some other wallet produced, returning its index
    pub fn sync_leaf(&mut self, commitment: Element) -> Result<u64> {
        Ok(self.tree.add_leaf(commitment)?)
    }

    /// Start building a transaction spending from this wallet
    pub fn builder<R: RngCore + CryptoRng>(&self, rng: R) -> TxBuilder<'_, R, HEIGHT> {
        TxBuilder::new(self, rng)
    }

    /// Apply a transaction the pool has admitted
    ///
    /// Adopts the tree with the transaction's outputs appended, and records the non-zero outputs
    /// this wallet owns. The spent inputs are learned from the pool's events, see
    /// [`Wallet::consume_events`]. Returns the recorded notes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StaleBuild`] if the transaction wasn't built against the current root, in
    /// which case nothing changes
    pub fn confirm(&mut self, built: &Built<HEIGHT>) -> Result<Vec<NoteWithMeta>> {
        let built_on = built.join_split.old_root;
        let current = self.root_hash();
        if built_on != current {
            return Err(Error::StaleBuild { built_on, current });
        }

        let owner = self.owner_key();
        let owned: Vec<_> = built
            .outputs
            .iter()
            .filter(|output| output.note.owner_key == owner && !output.note.is_padding())
            .collect();

        self.tree = built.tree.clone();

        let mut recorded = Vec::with_capacity(owned.len());
        for output in owned {
            recorded.push(self.add_note(output.leaf_index, output.note)?);
        }

        tracing::debug!(root = %self.root_hash(), recorded = recorded.len(), "confirmed transaction");
        Ok(recorded)
    }
}
