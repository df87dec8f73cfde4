//! Helpers shared by the tests of every crate in the workspace

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use rand_chacha::{rand_core::SeedableRng, ChaChaRng};
use tempdir::TempDir;

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,shielded_pool=debug,wallet=debug".into());

    // another test harness may have installed a subscriber already
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
});

/// Install a tracing subscriber that writes through the test harness
///
/// Safe to call from every test, only the first call does anything. Set `RUST_LOG` to override
/// the default filter
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// A deterministic RNG, so failures can be replayed
pub fn rng(seed: u8) -> ChaChaRng {
    ChaChaRng::from_seed([seed; 32])
}

/// A file in a temporary directory, deleted when dropped
#[derive(Debug)]
pub struct TempFile {
    // held for its `Drop`
    _dir: TempDir,
    path: PathBuf,
}

impl TempFile {
    /// Write `contents` to a fresh file called `name`
    pub fn new(name: &str, contents: &str) -> Self {
        let dir = TempDir::new("testutil").expect("failed to create temp dir");
        let path = dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write temp file");

        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
