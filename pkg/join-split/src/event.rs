use serde::{Deserialize, Serialize};
use zk_primitives::Element;

/// The name of the event emitted for every nullifier the pool accepts
pub const NULLIFY_EVENT: &str = "nullify";

/// An event emitted by the pool, which wallets use to learn which notes were spent
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolEvent {
    pub name: String,
    pub nullifier: Element,
}

impl PoolEvent {
    /// A [`NULLIFY_EVENT`] for `nullifier`
    #[must_use]
    pub fn nullify(nullifier: Element) -> Self {
        Self {
            name: NULLIFY_EVENT.to_string(),
            nullifier,
        }
    }
}
