#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

//! Notes, commitments, nullifiers and the fixed-arity join-split transaction
//!
//! A join-split consumes `K` existing notes and produces `K` new ones, optionally moving a public
//! amount in or out of the pool:
//!
//! ```text
//!  (Private)                                 (Public)
//!                      ┌────────────┐
//!  InputNote   ───►    │            │  ───►   Nullifier (for each InputNote)
//!  InputNote   ───►    │ JoinSplit  │  ───►   Commitment (for each OutputNote)
//!  OutputNote  ───►    │            │  ───►   Old root / new root
//!  OutputNote  ───►    │            │  ───►   Public amount
//!                      └────────────┘
//! ```
//!
//! [`JoinSplit::public_output`] checks every constraint a prover has to enforce, and the
//! [`Prover`]/[`ProofVerifier`] traits are the seam to the proof system.

pub mod constants;
mod data;
mod error;
mod event;
mod input_note;
mod join_split;
mod note;
mod proof;

pub use constants::{MAX_NOTE_VALUE, MERKLE_TREE_HEIGHT, UTXO_INPUTS, UTXO_OUTPUTS};
pub use data::{
    InputNote, JoinSplit, Note, NoteWithMeta, OutputNote, Proof, PublicOutput, TxKind,
};
pub use error::{ConstraintError, Result};
pub use event::{PoolEvent, NULLIFY_EVENT};
pub use note::owner_key_for;
pub use proof::{ProofVerifier, Prover, TranscriptProver, TranscriptVerifier};
pub use zk_primitives::Element;
