use borsh::{BorshDeserialize, BorshSerialize};
use imt::Path;
use serde::{Deserialize, Serialize};
use zk_primitives::Element;

/// A note: an amount of value owned by whoever knows the spending key behind `owner_key`
///
/// Only the note's [commitment](Note::commitment) is ever published
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct Note {
    /// Public key of the owner, derived from their spending key with
    /// [`owner_key_for`](crate::owner_key_for)
    pub owner_key: Element,
    /// Value of the note
    pub amount: Element,
    /// Random value that hides the other fields inside the commitment
    pub blinding: Element,
}

/// A [`Note`] together with the values derived from its position in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteWithMeta {
    pub note: Note,
    pub leaf_index: u64,
    pub commitment: Element,
    pub nullifier: Element,
}

/// A note being spent, with everything needed to prove ownership and membership
#[derive(Debug, Clone)]
pub struct InputNote<const HEIGHT: usize> {
    pub note: Note,
    /// Secret key for the owner key, required to spend a note
    pub spending_key: Element,
    /// Path proving the note's commitment is in the tree at the join-split's old root
    pub path: Path<HEIGHT>,
}

/// A note being created, with the path captured when its commitment was appended
#[derive(Debug, Clone)]
pub struct OutputNote<const HEIGHT: usize> {
    pub note: Note,
    pub path: Path<HEIGHT>,
}

/// The shape of a join-split, which fixes the sign of its public amount
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub enum TxKind {
    /// Value moves from the transparent ledger into the pool
    Deposit,
    /// Value moves from the pool to the transparent ledger
    Withdraw,
    /// Value moves between notes only
    #[default]
    Transfer,
}

impl core::fmt::Display for TxKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Transfer => "transfer",
        };

        f.write_str(s)
    }
}

/// The private input to a join-split proof
///
/// Output notes must be appended to the tree in order, so output `i` proves an empty slot in the
/// tree produced by appending outputs `0..i` to the tree at `old_root`
#[derive(Debug, Clone)]
pub struct JoinSplit<const K: usize, const HEIGHT: usize> {
    pub inputs: [InputNote<HEIGHT>; K],
    pub outputs: [OutputNote<HEIGHT>; K],
    /// Root of the tree the inputs are proven against
    pub old_root: Element,
    /// Positive when depositing, negative when withdrawing
    pub public_amount: i128,
    pub kind: TxKind,
}

/// The public values a join-split proof commits to
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct PublicOutput<const K: usize> {
    #[serde(with = "element_array")]
    pub nullifiers: [Element; K],
    #[serde(with = "element_array")]
    pub commitments: [Element; K],
    pub old_root: Element,
    pub new_root: Element,
    /// The signed public amount, see [`Element::from_signed`]
    pub public_amount: Element,
}

/// A proof together with the public output it claims
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct Proof<const K: usize> {
    pub public_output: PublicOutput<K>,
    #[serde(with = "hex::serde")]
    pub bytes: Vec<u8>,
}

/// serde doesn't support const generic arrays, so go through a sequence
mod element_array {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use zk_primitives::Element;

    pub fn serialize<S: Serializer, const K: usize>(
        elements: &[Element; K],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(elements)
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const K: usize>(
        deserializer: D,
    ) -> Result<[Element; K], D::Error> {
        let elements = Vec::<Element>::deserialize(deserializer)?;
        let len = elements.len();

        elements
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &"a fixed number of elements"))
    }
}
