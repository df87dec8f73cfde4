/// The height of the note commitment tree, which holds `2^MERKLE_TREE_HEIGHT` notes
pub const MERKLE_TREE_HEIGHT: usize = 8;

pub const UTXO_INPUTS: usize = 2;
pub const UTXO_OUTPUTS: usize = 2;

/// The largest amount a single note can hold
///
/// Keeping amounts in `u64` means the sum of a transaction's notes can never wrap around the field
/// modulus
pub const MAX_NOTE_VALUE: u64 = u64::MAX;

/// Domain separator for [`TranscriptProver`](crate::TranscriptProver) tags
pub const TRANSCRIPT_DOMAIN: &[u8] = b"shielded-pool/transcript/v1";
