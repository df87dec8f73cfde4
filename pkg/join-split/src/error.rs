use zk_primitives::Element;

/// A join-split constraint that doesn't hold
///
/// A prover must refuse to produce a proof for a [`JoinSplit`](crate::JoinSplit) that fails any
/// of these
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintError {
    #[error("input {input} is not owned by the spending key")]
    OwnerMismatch { input: usize },

    #[error("input {input} is not in the tree with root {root}")]
    NotInTree { input: usize, root: Element },

    #[error("output {output} path does not extend root {expected}")]
    OutputPathMismatch { output: usize, expected: Element },

    #[error("note amount {amount} is out of range")]
    AmountOutOfRange { amount: Element },

    #[error("value not conserved: inputs {inputs} + public amount {public_amount} != outputs {outputs}")]
    ValueNotConserved {
        inputs: u128,
        outputs: u128,
        public_amount: i128,
    },

    #[error("public amount {public_amount} is not valid for a {kind} transaction")]
    KindMismatch {
        kind: crate::TxKind,
        public_amount: i128,
    },

    #[error("failed to encode the public output: {0}")]
    Encoding(String),
}

pub type Result<T, E = ConstraintError> = core::result::Result<T, E>;
