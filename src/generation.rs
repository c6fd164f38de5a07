//! Load-generation guard. Each dictionary load advances the generation and
//! cancels the previous in-flight fetch, so a stale completion can never
//! overwrite the result of a newer request.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

pub(crate) struct LoadGeneration {
    current_token: RwLock<CancellationToken>,
    generation: AtomicU64,
}

impl LoadGeneration {
    pub fn new() -> Self {
        Self {
            current_token: RwLock::new(CancellationToken::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Cancel the previous load, advance the generation, and hand out the
    /// token + generation for the new one.
    pub fn advance(&self) -> (CancellationToken, u64) {
        let mut token = self.current_token.write();
        token.cancel();
        let fresh = CancellationToken::new();
        let handle = fresh.clone();
        *token = fresh;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        (handle, generation)
    }

    /// Whether a completion carrying `generation` is still the newest.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
