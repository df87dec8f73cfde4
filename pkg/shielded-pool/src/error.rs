use zk_primitives::Element;

use crate::{Address, AssetId};

/// Why the pool rejected a transaction
///
/// A rejected transaction never changes the pool's state
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("proof failed verification")]
    ProofInvalid,

    #[error("proof was built against root {got}, but the pool is at {expected}")]
    RootMismatch { expected: Element, got: Element },

    #[error("nullifier {0} has already been spent")]
    NullifierReused(Element),

    #[error("public amount {0} can't be bridged")]
    InvalidPublicAmount(Element),

    #[error("this pool does not move value to or from the ledger")]
    BridgingDisabled,

    #[error("no reserve account for asset {0}")]
    UnknownAsset(AssetId),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("config error")]
    Config(#[from] figment::Error),
}

/// A transparent ledger refused a transfer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("account {account} holds {have} of asset {asset}, needs {need}")]
    InsufficientFunds {
        asset: AssetId,
        account: Address,
        need: u64,
        have: u64,
    },

    #[error("balance of account {account} would overflow")]
    Overflow { account: Address },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
