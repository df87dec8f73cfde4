#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! Field elements and hashing shared by the shielded pool crates
//!
//! Every value that ends up inside a commitment, a nullifier or a Merkle node is an [`Element`].
//! Hashing is Poseidon over the Pallas base field.

mod element;
mod hash;
mod path;

pub use element::Element;
pub use hash::{hash_bytes, hash_merge};
pub use path::compute_merkle_root;

/// The base element used by cryptographic operations
///
/// This is (roughly) an integer modulo `p` where `p` is [`Element::MODULUS`]
pub type Base = pasta_curves::Fp;
