//! Memoization of node hashes
//!
//! Wallets rebuild the same tree the pool commits to, often several of them in one process, and
//! every insert rehashes a full path. A [`SimpleHashCache`] shared between trees turns repeated
//! paths into table lookups.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use dashmap::DashMap;
use zk_primitives::{hash_merge, Element};

/// Computes the hash of two sibling nodes
///
/// Implementations must always agree with [`hash_merge`], otherwise every root and witness of the
/// [`Tree`](crate::Tree) using them is wrong
pub trait HashCache: Sync + 'static {
    /// `hash_merge([left, right])`, possibly remembered from an earlier call
    fn hash(&self, left: Element, right: Element) -> Element {
        hash_merge([left, right])
    }
}

/// The default cache of a [`Tree`](crate::Tree), which remembers nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHashCache;

impl HashCache for NoopHashCache {}

/// How often a [`SimpleHashCache`] could answer from memory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the table
    pub hits: u64,
    /// Lookups that had to call [`hash_merge`]
    pub misses: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
}

/// A thread-safe table of known node hashes
///
/// Clones share the same table, so trees that insert the same leaves only hash each node once:
///
/// ```rust
/// # use imt::*;
/// # use imt::hash_cache::*;
/// let cache = SimpleHashCache::new();
///
/// let mut pool_view = Tree::<8, _>::new_with_cache(cache.clone());
/// let mut wallet_view = Tree::<8, _>::new_with_cache(cache.clone());
///
/// pool_view.add_leaf(Element::new(1)).unwrap();
/// wallet_view.add_leaf(Element::new(1)).unwrap();
///
/// assert_eq!(cache.stats(), CacheStats { hits: 8, misses: 8 });
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimpleHashCache {
    table: Arc<DashMap<(Element, Element), Element>>,
    counters: Arc<Counters>,
}

impl HashCache for SimpleHashCache {
    fn hash(&self, left: Element, right: Element) -> Element {
        if let Some(known) = self.table.get(&(left, right)) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            return *known;
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        let hash = hash_merge([left, right]);
        self.table.insert((left, right), hash);
        hash
    }
}

impl SimpleHashCache {
    /// An empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of remembered hashes
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether nothing has been remembered yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Forget every hash, keeping the counters
    pub fn evict_all(&self) {
        self.table.clear();
    }

    /// A snapshot of the hit and miss counters
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
        }
    }
}
