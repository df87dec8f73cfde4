#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_errors_doc)]

//! The on-ledger half of the shielded pool
//!
//! [`ShieldedPool`] holds the current commitment root and the set of spent nullifiers, and admits
//! join-split proofs one at a time. Value enters and leaves the pool through a transparent
//! [`Ledger`].

mod address;
mod config;
mod error;
mod ledger;
mod pool;

pub use address::{Address, AddressParseError, AssetId};
pub use config::{PoolConfig, ReserveEntry};
pub use error::{Error, LedgerError, Result};
pub use join_split::{PoolEvent, NULLIFY_EVENT};
pub use ledger::{InMemoryLedger, Ledger};
pub use pool::{ShieldedPool, Submission};
