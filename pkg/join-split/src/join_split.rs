use zk_primitives::Element;

use crate::{
    owner_key_for, ConstraintError, InputNote, JoinSplit, Note, OutputNote, PublicOutput, Result,
    TxKind,
};

impl TxKind {
    /// Whether `public_amount` has the sign this kind of transaction requires
    #[must_use]
    pub fn allows(self, public_amount: i128) -> bool {
        match self {
            TxKind::Deposit => public_amount > 0,
            TxKind::Withdraw => public_amount < 0,
            TxKind::Transfer => public_amount == 0,
        }
    }
}

impl<const K: usize, const HEIGHT: usize> JoinSplit<K, HEIGHT> {
    pub fn new(
        inputs: [InputNote<HEIGHT>; K],
        outputs: [OutputNote<HEIGHT>; K],
        old_root: Element,
        public_amount: i128,
        kind: TxKind,
    ) -> Self {
        Self {
            inputs,
            outputs,
            old_root,
            public_amount,
            kind,
        }
    }

    /// The nullifiers of the inputs, in input order
    #[must_use]
    pub fn nullifiers(&self) -> [Element; K] {
        core::array::from_fn(|i| self.inputs[i].nullifier())
    }

    /// The commitments of the outputs, in output order
    #[must_use]
    pub fn commitments(&self) -> [Element; K] {
        core::array::from_fn(|i| self.outputs[i].note.commitment())
    }

    /// Check every constraint and compute the public output a proof of this join-split commits to
    ///
    /// The constraints are:
    ///  - every non-padding input is owned by its spending key
    ///  - every non-padding input is in the tree at `old_root`
    ///  - the outputs were appended in order starting from `old_root`, the final root is the new
    ///    root
    ///  - every amount is at most [`MAX_NOTE_VALUE`](crate::MAX_NOTE_VALUE)
    ///  - `sum(inputs) + public_amount == sum(outputs)`, without wrapping
    ///  - the public amount has the sign required by `kind`
    ///
    /// Nullifiers are always derived from the leaf index the input's path proves
    pub fn public_output(&self) -> Result<PublicOutput<K>> {
        for (input, note) in self.inputs.iter().enumerate() {
            if note.is_padding() {
                continue;
            }

            if note.note.owner_key != owner_key_for(note.spending_key) {
                return Err(ConstraintError::OwnerMismatch { input });
            }

            if note.recent_root() != self.old_root {
                return Err(ConstraintError::NotInTree {
                    input,
                    root: self.old_root,
                });
            }
        }

        let mut running_root = self.old_root;
        for (output, note) in self.outputs.iter().enumerate() {
            if note.root_before() != running_root {
                return Err(ConstraintError::OutputPathMismatch {
                    output,
                    expected: running_root,
                });
            }

            running_root = note.root_after();
        }

        let inputs = sum_amounts(self.inputs.iter().map(|input| &input.note))?;
        let outputs = sum_amounts(self.outputs.iter().map(|output| &output.note))?;

        let conserved = i128::try_from(inputs)
            .ok()
            .and_then(|inputs| inputs.checked_add(self.public_amount))
            .zip(i128::try_from(outputs).ok())
            .is_some_and(|(left, right)| left == right);

        if !conserved {
            return Err(ConstraintError::ValueNotConserved {
                inputs,
                outputs,
                public_amount: self.public_amount,
            });
        }

        if !self.kind.allows(self.public_amount) {
            return Err(ConstraintError::KindMismatch {
                kind: self.kind,
                public_amount: self.public_amount,
            });
        }

        Ok(PublicOutput {
            nullifiers: self.nullifiers(),
            commitments: self.commitments(),
            old_root: self.old_root,
            new_root: running_root,
            public_amount: Element::from_signed(self.public_amount),
        })
    }
}

fn sum_amounts<'a>(notes: impl Iterator<Item = &'a Note>) -> Result<u128> {
    notes
        .map(|note| {
            note.value()
                .map(u128::from)
                .ok_or(ConstraintError::AmountOutOfRange {
                    amount: note.amount,
                })
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use imt::Tree;
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};
    use test_strategy::proptest;

    use super::*;

    type Tx = JoinSplit<2, 8>;

    struct Setup {
        rng: ChaChaRng,
        tree: Tree<8>,
        spending_key: Element,
    }

    impl Setup {
        fn new(seed: u8) -> Self {
            let mut rng = ChaChaRng::from_seed([seed; 32]);
            let spending_key = Element::secure_random(&mut rng);

            Self {
                rng,
                tree: Tree::new(),
                spending_key,
            }
        }

        fn owner(&self) -> Element {
            owner_key_for(self.spending_key)
        }

        fn stored_input(&mut self, amount: u64) -> InputNote<8> {
            let note = Note::new(self.owner(), amount, &mut self.rng);
            let index = self.tree.add_leaf(note.commitment()).unwrap();
            InputNote::new(note, self.spending_key, self.tree.witness(index).unwrap())
        }

        /// Store several notes, witnessing each one against the root after the last insert
        fn stored_inputs<const N: usize>(&mut self, amounts: [u64; N]) -> [InputNote<8>; N] {
            let owner = self.owner();
            let notes = amounts.map(|amount| Note::new(owner, amount, &mut self.rng));
            let indices = notes.map(|note| self.tree.add_leaf(note.commitment()).unwrap());

            core::array::from_fn(|i| {
                let path = self.tree.witness(indices[i]).unwrap();
                InputNote::new(notes[i], self.spending_key, path)
            })
        }

        fn padding_input(&mut self) -> InputNote<8> {
            InputNote::padding(self.spending_key, &mut self.rng)
        }

        fn outputs(&mut self, amounts: [u64; 2]) -> [OutputNote<8>; 2] {
            let owner = self.owner();
            let notes = amounts.map(|amount| Note::new(owner, amount, &mut self.rng));
            let paths = self
                .tree
                .insert_with_paths(notes.iter().map(Note::commitment))
                .unwrap();

            [
                OutputNote::new(notes[0], paths[0].clone()),
                OutputNote::new(notes[1], paths[1].clone()),
            ]
        }
    }

    #[test]
    fn deposit_has_positive_public_amount() {
        let mut setup = Setup::new(0);
        let old_root = setup.tree.root_hash();

        let inputs = [setup.padding_input(), setup.padding_input()];
        let outputs = setup.outputs([1500, 0]);
        let tx = Tx::new(inputs, outputs, old_root, 1500, TxKind::Deposit);

        let output = tx.public_output().unwrap();

        assert_eq!(output.old_root, old_root);
        assert_eq!(output.new_root, setup.tree.root_hash());
        assert_eq!(output.public_amount, Element::new(1500));
        assert_eq!(output.commitments, tx.commitments());
        assert_ne!(output.nullifiers[0], output.nullifiers[1]);
    }

    #[test]
    fn transfer_outputs_chain_from_old_root() {
        let mut setup = Setup::new(1);
        let inputs = setup.stored_inputs([1000, 2000]);
        let old_root = setup.tree.root_hash();

        let outputs = setup.outputs([1500, 1500]);
        let tx = Tx::new(inputs.clone(), outputs, old_root, 0, TxKind::Transfer);
        assert!(tx.public_output().is_ok());

        let outputs = setup.outputs([1500, 1501]);
        let tx = Tx::new(inputs, outputs, old_root, 0, TxKind::Transfer);
        assert!(matches!(
            tx.public_output(),
            Err(ConstraintError::OutputPathMismatch { output: 0, .. })
        ));
    }

    #[test]
    fn witness_taken_before_later_inserts_is_stale() {
        let mut setup = Setup::new(8);
        let early = setup.stored_input(1000);
        let late = setup.stored_input(2000);
        let old_root = setup.tree.root_hash();

        let outputs = setup.outputs([1500, 1500]);
        let tx = Tx::new([early, late], outputs, old_root, 0, TxKind::Transfer);

        assert!(matches!(
            tx.public_output(),
            Err(ConstraintError::NotInTree { input: 0, .. })
        ));
    }

    #[test]
    fn unbalanced_transfer_is_rejected() {
        let mut setup = Setup::new(2);
        let inputs = [setup.stored_input(1000), setup.padding_input()];
        let old_root = setup.tree.root_hash();

        let outputs = setup.outputs([900, 200]);
        let tx = Tx::new(inputs, outputs, old_root, 0, TxKind::Transfer);

        assert_eq!(
            tx.public_output().unwrap_err(),
            ConstraintError::ValueNotConserved {
                inputs: 1000,
                outputs: 1100,
                public_amount: 0,
            }
        );
    }

    #[test]
    fn withdraw_needs_negative_amount() {
        let mut setup = Setup::new(3);
        let inputs = [setup.stored_input(1000), setup.padding_input()];
        let old_root = setup.tree.root_hash();

        let outputs = setup.outputs([0, 400]);
        let tx = Tx::new(inputs, outputs, old_root, -600, TxKind::Withdraw);
        let output = tx.public_output().unwrap();

        assert_eq!(output.public_amount.to_signed(), Some(-600));
        assert_eq!(output.nullifiers[0], tx.inputs[0].note.nullifier(0, setup.spending_key));
    }

    #[test]
    fn kind_must_match_sign() {
        let mut setup = Setup::new(4);
        let inputs = [setup.stored_input(1000), setup.padding_input()];
        let old_root = setup.tree.root_hash();

        let outputs = setup.outputs([0, 400]);
        let tx = Tx::new(inputs, outputs, old_root, -600, TxKind::Transfer);

        assert!(matches!(
            tx.public_output(),
            Err(ConstraintError::KindMismatch { .. })
        ));
    }

    #[test]
    fn stolen_note_is_rejected() {
        let mut setup = Setup::new(5);
        let mut input = setup.stored_input(1000);
        let old_root = setup.tree.root_hash();

        input.spending_key = Element::new(1);
        let padding = setup.padding_input();
        let outputs = setup.outputs([1000, 0]);
        let tx = Tx::new([input, padding], outputs, old_root, 0, TxKind::Transfer);

        assert_eq!(
            tx.public_output().unwrap_err(),
            ConstraintError::OwnerMismatch { input: 0 }
        );
    }

    #[test]
    fn input_must_be_in_old_root() {
        let mut setup = Setup::new(6);
        let input = setup.stored_input(1000);
        let padding = setup.padding_input();

        // the root moves on after the witness was captured
        setup.tree.add_leaf(Element::new(5)).unwrap();
        let old_root = setup.tree.root_hash();

        let outputs = setup.outputs([1000, 0]);
        let tx = Tx::new([input, padding], outputs, old_root, 0, TxKind::Transfer);

        assert!(matches!(
            tx.public_output(),
            Err(ConstraintError::NotInTree { input: 0, .. })
        ));
    }

    #[test]
    fn oversized_amount_is_rejected() {
        let mut setup = Setup::new(7);
        let old_root = setup.tree.root_hash();
        let inputs = [setup.padding_input(), setup.padding_input()];

        let huge = Note::restore(setup.owner(), Element::from(u128::MAX), Element::new(1));
        let paths = setup
            .tree
            .insert_with_paths([huge.commitment(), Element::NULL_HASH])
            .unwrap();
        let padding = Note::restore(setup.owner(), Element::ZERO, Element::ZERO);
        let outputs = [
            OutputNote::new(huge, paths[0].clone()),
            OutputNote::new(padding, paths[1].clone()),
        ];

        let tx = Tx::new(inputs, outputs, old_root, 1, TxKind::Deposit);

        assert!(matches!(
            tx.public_output(),
            Err(ConstraintError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn error_messages() {
        let error = ConstraintError::ValueNotConserved {
            inputs: 1,
            outputs: 2,
            public_amount: -3,
        };

        expect_test::expect!["value not conserved: inputs 1 + public amount -3 != outputs 2"]
            .assert_eq(&error.to_string());
    }

    #[proptest]
    fn any_deposit_amount_is_valid(#[strategy(1u64..)] amount: u64, seed: u8) {
        let mut setup = Setup::new(seed);
        let old_root = setup.tree.root_hash();

        let inputs = [setup.padding_input(), setup.padding_input()];
        let outputs = setup.outputs([amount, 0]);
        let tx = Tx::new(inputs, outputs, old_root, i128::from(amount), TxKind::Deposit);

        let output = tx.public_output().unwrap();
        assert_eq!(output.public_amount.to_signed(), Some(i128::from(amount)));
    }
}
