use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use join_split::MERKLE_TREE_HEIGHT;
use serde::{Deserialize, Serialize};

use crate::{Address, AssetId, Result};

/// Prefix of environment variables that override [`PoolConfig`] fields
pub const ENV_PREFIX: &str = "SHIELDED_POOL_";

/// How a [`ShieldedPool`](crate::ShieldedPool) behaves
///
/// ```toml
/// bridges_value = true
/// per_asset_reserve = true
/// tree_height = 8
///
/// [[reserves]]
/// asset = 0
/// address = "0x0101010101010101010101010101010101010101"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Whether transactions may carry a non-zero public amount
    pub bridges_value: bool,
    /// Whether each asset has its own reserve account, otherwise every asset uses `reserve`
    pub per_asset_reserve: bool,
    /// The reserve account used when reserves aren't per asset
    pub reserve: Option<Address>,
    /// Reserve accounts known at startup, when reserves are per asset
    pub reserves: Vec<ReserveEntry>,
    /// Height of the commitment tree, used to derive the initial root
    pub tree_height: usize,
}

/// The reserve account for one asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveEntry {
    pub asset: AssetId,
    pub address: Address,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            bridges_value: true,
            per_asset_reserve: true,
            reserve: None,
            reserves: Vec::new(),
            tree_height: MERKLE_TREE_HEIGHT,
        }
    }
}

impl PoolConfig {
    /// The config sources, in increasing priority: defaults, the TOML file at `path` (if it
    /// exists), then `SHIELDED_POOL_*` environment variables
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = Self::figment(path.as_ref()).extract()?;
        tracing::info!(?config, path = %path.as_ref().display(), "loaded pool config");

        Ok(config)
    }

    /// Load from `SHIELDED_POOL_*` environment variables only
    pub fn from_env() -> Result<Self> {
        Ok(Figment::new().merge(Env::prefixed(ENV_PREFIX)).extract()?)
    }
}
