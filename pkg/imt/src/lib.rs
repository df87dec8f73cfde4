#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! # IMT (**I**ndexed **M**erkle **T**ree)
//!
//! An append-only Merkle [`Tree`] of fixed height, holding note commitments in insertion order.
//!
//! ```rust
//! # use imt::*;
//! // the tree is generic over the height, a tree of height 8 holds 256 leaves
//! let mut tree = Tree::<8>::new();
//!
//! let index = tree.add_leaf(Element::new(1)).unwrap();
//! assert_eq!(index, 0);
//!
//! // every inserted leaf has a witness that recomputes the current root
//! let path = tree.witness(index).unwrap();
//! assert_eq!(path.compute_root_hash(Element::new(1)), tree.root_hash());
//! ```
//!
//! ## Root hash
//!
//! The root hash is determined entirely by the sequence of leaves. Two trees of the same height
//! that received the same commitments in the same order always have the same root hash and the
//! same per-leaf witnesses. Empty slots hold [`Element::NULL_HASH`], and empty subtrees hash to
//! [`empty_tree_hash`].
//!
//! ## Witness staleness
//!
//! A leaf is never overwritten or removed, so a [`Path`] captured for leaf `i` still proves leaf
//! `i` against the root it was captured at. Appending more leaves changes the root though, so a
//! path must always be paired with [`Path::actual_root_hash`], not with whatever the tree's root
//! happens to be later.

mod hash;
pub mod hash_cache;
mod macros;
mod tree;

pub use hash::empty_tree_hash;
pub use tree::{CapacityError, Path, Tree};
pub use zk_primitives::*;
