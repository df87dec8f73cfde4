use imt::{hash_cache::SimpleHashCache, Path, Tree};
use join_split::{
    InputNote, JoinSplit, Note, NoteWithMeta, OutputNote, TxKind, UTXO_INPUTS, UTXO_OUTPUTS,
};
use rand::{CryptoRng, RngCore};
use zk_primitives::Element;

use crate::{Error, Result, Wallet};

/// A join-split ready to be proven, together with the notes it creates
///
/// Nothing in the wallet changes until the pool admits the proof and the caller passes this to
/// [`Wallet::confirm`]
#[derive(Debug, Clone)]
pub struct Built<const HEIGHT: usize> {
    pub join_split: JoinSplit<UTXO_INPUTS, HEIGHT>,
    /// The output notes with the leaf index they were appended at
    ///
    /// Nullifiers are derived with the building wallet's spending key, so they are only
    /// meaningful for notes that wallet owns
    pub outputs: [NoteWithMeta; UTXO_OUTPUTS],
    /// The wallet's tree with the outputs appended
    pub(crate) tree: Tree<HEIGHT, SimpleHashCache>,
}

/// Builds deposits, withdrawals and transfers for a [`Wallet`]
///
/// Output commitments are appended to a copy of the wallet's tree, the wallet itself is only
/// read
pub struct TxBuilder<'a, R, const HEIGHT: usize> {
    wallet: &'a Wallet<HEIGHT>,
    rng: R,
}

impl<'a, R, const HEIGHT: usize> TxBuilder<'a, R, HEIGHT>
where
    R: RngCore + CryptoRng,
{
    pub fn new(wallet: &'a Wallet<HEIGHT>, rng: R) -> Self {
        Self { wallet, rng }
    }

    /// Move `amount` from the sender's transparent balance into a new note
    ///
    /// Both inputs are padding, the outputs are the new note and a padding note
    #[tracing::instrument(err, skip(self))]
    pub fn deposit(&mut self, amount: u64) -> Result<Built<HEIGHT>> {
        if amount == 0 {
            return Err(Error::ZeroAmount);
        }

        let owner = self.wallet.owner_key();
        let inputs = [self.padding_input(), self.padding_input()];
        let outputs = [
            Note::new(owner, amount, &mut self.rng),
            Note::padding(owner, &mut self.rng),
        ];

        self.build(inputs, outputs, i128::from(amount), TxKind::Deposit)
    }

    /// Move `amount` out of the pool to the sender's transparent balance
    ///
    /// The outputs are a padding note and the change
    #[tracing::instrument(err, skip(self))]
    pub fn withdraw(&mut self, amount: u64) -> Result<Built<HEIGHT>> {
        if amount == 0 {
            return Err(Error::ZeroAmount);
        }

        let (inputs, change) = self.select_inputs(amount)?;

        let owner = self.wallet.owner_key();
        let outputs = [
            Note::padding(owner, &mut self.rng),
            Note::new(owner, change, &mut self.rng),
        ];

        self.build(inputs, outputs, -i128::from(amount), TxKind::Withdraw)
    }

    /// Send `amount` to the owner of `to`, entirely inside the pool
    ///
    /// The outputs are the payment and the change
    #[tracing::instrument(err, skip(self))]
    pub fn transfer(&mut self, to: Element, amount: u64) -> Result<Built<HEIGHT>> {
        if amount == 0 {
            return Err(Error::ZeroAmount);
        }

        let (inputs, change) = self.select_inputs(amount)?;

        let owner = self.wallet.owner_key();
        let outputs = [
            Note::new(to, amount, &mut self.rng),
            Note::new(owner, change, &mut self.rng),
        ];

        self.build(inputs, outputs, 0, TxKind::Transfer)
    }

    fn padding_input(&mut self) -> InputNote<HEIGHT> {
        InputNote::padding(self.wallet.spending_key(), &mut self.rng)
    }

    /// Select notes covering `amount`, pad them to the input arity and return the change
    fn select_inputs(&mut self, amount: u64) -> Result<([InputNote<HEIGHT>; UTXO_INPUTS], u64)> {
        let selected = self.wallet.notes_up_to(amount)?;

        let total: u128 = selected.iter().map(|note| u128::from(note.value())).sum();
        let change = u64::try_from(total - u128::from(amount))
            .map_err(|_| Error::ChangeOutOfRange { total, amount })?;

        let mut real = selected
            .iter()
            .map(|note| self.input_for(note))
            .collect::<Result<Vec<_>>>()?
            .into_iter();

        let spending_key = self.wallet.spending_key();
        let inputs = core::array::from_fn(|_| {
            real.next()
                .unwrap_or_else(|| InputNote::padding(spending_key, &mut self.rng))
        });

        Ok((inputs, change))
    }

    fn input_for(&self, note: &NoteWithMeta) -> Result<InputNote<HEIGHT>> {
        let path: Path<HEIGHT> = self
            .wallet
            .tree
            .witness(note.leaf_index)
            .filter(|path| path.proves(note.commitment))
            .ok_or(Error::UnknownLeaf {
                index: note.leaf_index,
            })?;

        Ok(InputNote::new(note.note, self.wallet.spending_key(), path))
    }

    fn build(
        &mut self,
        inputs: [InputNote<HEIGHT>; UTXO_INPUTS],
        notes: [Note; UTXO_OUTPUTS],
        public_amount: i128,
        kind: TxKind,
    ) -> Result<Built<HEIGHT>> {
        let old_root = self.wallet.root_hash();
        let mut tree = self.wallet.tree.clone();

        let paths: [Path<HEIGHT>; UTXO_OUTPUTS] = tree
            .insert_with_paths(notes.iter().map(Note::commitment))?
            .try_into()
            .map_err(|_| Error::UnknownLeaf { index: tree.len() })?;

        let spending_key = self.wallet.spending_key();
        let metas = core::array::from_fn(|i| notes[i].with_meta(paths[i].index(), spending_key));
        let outputs = core::array::from_fn(|i| OutputNote::new(notes[i], paths[i].clone()));

        let join_split = JoinSplit::new(inputs, outputs, old_root, public_amount, kind);
        join_split.public_output()?;

        tracing::info!(%kind, public_amount, %old_root, "built join-split");

        Ok(Built {
            join_split,
            outputs: metas,
            tree,
        })
    }
}
