use std::collections::{HashMap, HashSet};

use join_split::{PoolEvent, Proof, ProofVerifier, UTXO_INPUTS};
use zk_primitives::Element;

use crate::{Address, AssetId, Error, Ledger, PoolConfig, Result};

/// A transaction waiting to be applied to the pool
#[derive(Debug, Clone)]
pub struct Submission<const K: usize> {
    /// The transparent account that pays deposits and receives withdrawals
    pub sender: Address,
    pub asset: AssetId,
    pub proof: Proof<K>,
}

/// The pool's on-ledger state machine
///
/// State is the current commitment root and the set of spent nullifiers. The only transition is
/// [`ShieldedPool::process_transaction`], which either applies a transaction completely or leaves
/// the state untouched.
#[derive(Debug)]
pub struct ShieldedPool<V, L, const K: usize = UTXO_INPUTS> {
    config: PoolConfig,
    verifier: V,
    ledger: L,
    root: Element,
    spent: HashSet<Element>,
    reserves: HashMap<AssetId, Address>,
    shared_reserve: Option<Address>,
    events: Vec<PoolEvent>,
}

impl<V, L, const K: usize> ShieldedPool<V, L, K>
where
    V: ProofVerifier,
    L: Ledger,
{
    /// A pool whose root is the root of an empty tree of height `config.tree_height`
    pub fn new(config: PoolConfig, verifier: V, ledger: L) -> Self {
        let reserves = config
            .reserves
            .iter()
            .map(|entry| (entry.asset, entry.address))
            .collect();

        Self {
            root: imt::empty_tree_hash(config.tree_height),
            shared_reserve: config.reserve,
            config,
            verifier,
            ledger,
            spent: HashSet::new(),
            reserves,
            events: Vec::new(),
        }
    }

    /// Overwrite the stored root
    ///
    /// This is a privileged operation for initialization and recovery, it bypasses every check
    #[tracing::instrument(skip(self))]
    pub fn set_root(&mut self, root: Element) {
        tracing::warn!(old_root = %self.root, "root overridden");
        self.root = root;
    }

    /// Set the reserve account that holds the pool's balance of `asset`
    ///
    /// When reserves aren't per asset, this sets the reserve shared by every asset
    #[tracing::instrument(skip(self))]
    pub fn set_pool_address(&mut self, asset: AssetId, address: Address) {
        match self.config.per_asset_reserve {
            true => {
                self.reserves.insert(asset, address);
            }
            false => {
                tracing::debug!("reserves are shared, asset ignored");
                self.shared_reserve = Some(address);
            }
        }
    }

    #[must_use]
    pub fn root(&self) -> Element {
        self.root
    }

    #[must_use]
    pub fn is_spent(&self, nullifier: Element) -> bool {
        self.spent.contains(&nullifier)
    }

    #[must_use]
    pub fn spent_count(&self) -> usize {
        self.spent.len()
    }

    /// Every event emitted so far, oldest first
    #[must_use]
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    #[must_use]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// The reserve account for `asset`, if one is configured
    #[must_use]
    pub fn reserve_for(&self, asset: AssetId) -> Option<Address> {
        match self.config.per_asset_reserve {
            true => self.reserves.get(&asset).copied(),
            false => self.shared_reserve,
        }
    }

    /// Validate and apply a join-split proof
    ///
    /// In order:
    ///  1. the proof must verify
    ///  2. the proof's old root must be the stored root
    ///  3. every nullifier must be unspent, and appear only once in the proof
    ///  4. a non-zero public amount is bridged through the ledger: positive amounts move from
    ///     `sender` to the reserve, negative amounts from the reserve to `sender`
    ///  5. the nullifiers are marked spent, one [`PoolEvent`] is emitted for each, and the root
    ///     becomes the proof's new root
    ///
    /// Any failure before step 5 leaves the pool and the ledger unchanged. Returns the events
    /// emitted by this transaction.
    #[tracing::instrument(err, ret, skip(self, proof), fields(old_root = %proof.public_output.old_root))]
    pub fn process_transaction(
        &mut self,
        sender: Address,
        asset: AssetId,
        proof: &Proof<K>,
    ) -> Result<Vec<PoolEvent>> {
        let output = &proof.public_output;

        if !self.verifier.verify(proof) {
            return Err(Error::ProofInvalid);
        }

        if output.old_root != self.root {
            return Err(Error::RootMismatch {
                expected: self.root,
                got: output.old_root,
            });
        }

        let mut fresh = HashSet::with_capacity(K);
        for nullifier in output.nullifiers {
            if self.is_spent(nullifier) || !fresh.insert(nullifier) {
                return Err(Error::NullifierReused(nullifier));
            }
        }

        self.bridge(sender, asset, output.public_amount)?;

        self.spent.extend(output.nullifiers);

        let events = Vec::from(output.nullifiers.map(PoolEvent::nullify));
        self.events.extend(events.iter().cloned());

        self.root = output.new_root;
        tracing::info!(new_root = %self.root, "transaction applied");

        Ok(events)
    }

    /// Apply transactions one after another
    ///
    /// Each transaction sees the effects of every earlier transaction in the block, and a rejected
    /// transaction doesn't stop later ones from being applied
    pub fn apply_block(&mut self, block: &[Submission<K>]) -> Vec<Result<Vec<PoolEvent>>> {
        block
            .iter()
            .map(|tx| self.process_transaction(tx.sender, tx.asset, &tx.proof))
            .collect()
    }

    fn bridge(&mut self, sender: Address, asset: AssetId, public_amount: Element) -> Result<()> {
        let signed = public_amount
            .to_signed()
            .ok_or(Error::InvalidPublicAmount(public_amount))?;

        if signed == 0 {
            return Ok(());
        }

        if !self.config.bridges_value {
            return Err(Error::BridgingDisabled);
        }

        let amount = u64::try_from(signed.unsigned_abs())
            .map_err(|_| Error::InvalidPublicAmount(public_amount))?;

        let reserve = self.reserve_for(asset).ok_or(Error::UnknownAsset(asset))?;

        let (from, to) = match signed.is_positive() {
            true => (sender, reserve),
            false => (reserve, sender),
        };

        tracing::debug!(%from, %to, amount, %asset, "bridging public amount");
        self.ledger.transfer(asset, from, to, amount)?;

        Ok(())
    }
}
