use std::collections::HashMap;

use crate::{Address, AssetId, LedgerError};

/// The transparent token ledger the pool bridges value to and from
pub trait Ledger {
    /// Move `amount` of `asset` from `from` to `to`
    ///
    /// A failed transfer must leave every balance unchanged
    fn transfer(
        &mut self,
        asset: AssetId,
        from: Address,
        to: Address,
        amount: u64,
    ) -> Result<(), LedgerError>;

    fn balance(&self, asset: AssetId, account: Address) -> u64;
}

/// A [`Ledger`] held in memory, for tests and local tooling
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: HashMap<(AssetId, Address), u64>,
}

impl InMemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `amount` of `asset` out of thin air and give it to `account`
    pub fn mint(
        &mut self,
        asset: AssetId,
        account: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let balance = self.balances.entry((asset, account)).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow { account })?;

        Ok(())
    }
}

impl Ledger for InMemoryLedger {
    fn transfer(
        &mut self,
        asset: AssetId,
        from: Address,
        to: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let have = self.balance(asset, from);
        let Some(remaining) = have.checked_sub(amount) else {
            return Err(LedgerError::InsufficientFunds {
                asset,
                account: from,
                need: amount,
                have,
            });
        };

        if from == to {
            return Ok(());
        }

        let credited = self
            .balance(asset, to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow { account: to })?;

        self.balances.insert((asset, from), remaining);
        self.balances.insert((asset, to), credited);

        Ok(())
    }

    fn balance(&self, asset: AssetId, account: Address) -> u64 {
        self.balances
            .get(&(asset, account))
            .copied()
            .unwrap_or_default()
    }
}
