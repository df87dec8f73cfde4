#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Client-side note tracking and join-split construction
//!
//! A [`Wallet`] keeps the notes it owns, the nullifiers it has seen spent, and its own copy of
//! the commitment tree. [`TxBuilder`] turns a deposit, withdrawal or transfer into a
//! [`JoinSplit`](join_split::JoinSplit) that a prover can consume.

mod builder;
mod error;
mod select;
mod wallet;

pub use builder::{Built, TxBuilder};
pub use error::{Error, Result};
pub use select::select_notes;
pub use wallet::Wallet;
