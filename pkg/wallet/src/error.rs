use imt::CapacityError;
use join_split::ConstraintError;
use zk_primitives::Element;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("insufficient balance: need {need}, have {have}")]
    InsufficientBalance { need: u64, have: u128 },

    #[error("change from {total} after paying {amount} does not fit in a note")]
    ChangeOutOfRange { total: u128, amount: u64 },

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("note at index {index} is not owned by this wallet")]
    NotOwner { index: u64 },

    #[error("transaction was built on root {built_on}, but the wallet is at {current}")]
    StaleBuild { built_on: Element, current: Element },

    #[error("note at index {index} is not in the local tree")]
    UnknownLeaf { index: u64 },

    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
