//! Dictionary readiness lifecycle: Created → Loading → {Loaded | Failed}.
//! Published over a watch channel so translation calls can suspend until a
//! terminal outcome is reached.

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

/// Readiness of the translation dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DictionaryState {
    /// No load has been requested yet.
    Created,
    /// A load is in flight; translation calls wait for the outcome.
    Loading,
    /// The dictionary is installed and usable.
    Loaded,
    /// The last load failed; translation degrades to passthrough.
    Failed,
}

impl std::fmt::Display for DictionaryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DictionaryState::Created => write!(f, "Created"),
            DictionaryState::Loading => write!(f, "Loading"),
            DictionaryState::Loaded => write!(f, "Loaded"),
            DictionaryState::Failed => write!(f, "Failed"),
        }
    }
}

impl DictionaryState {
    /// Whether waiters holding a line to translate may stop waiting.
    pub fn is_terminal(self) -> bool {
        matches!(self, DictionaryState::Loaded | DictionaryState::Failed)
    }
}

/// Holds the current state and fans transitions out to subscribers.
/// A duplicate load request simply re-enters `Loading`; there is no
/// transition matrix to enforce.
pub(crate) struct StateCell {
    state: RwLock<DictionaryState>,
    state_tx: watch::Sender<DictionaryState>,
    state_rx: watch::Receiver<DictionaryState>,
}

impl StateCell {
    pub fn new() -> Self {
        let (state_tx, state_rx) = watch::channel(DictionaryState::Created);
        Self {
            state: RwLock::new(DictionaryState::Created),
            state_tx,
            state_rx,
        }
    }

    /// Current state (non-blocking read).
    pub fn current(&self) -> DictionaryState {
        *self.state.read()
    }

    /// Move to `next` and notify subscribers.
    pub fn set(&self, next: DictionaryState) {
        let mut state = self.state.write();
        let prev = *state;
        *state = next;
        let _ = self.state_tx.send(next);
        info!(from = %prev, to = %next, "dictionary_state");
    }

    /// Move to `Failed`, surfacing the reason once.
    pub fn fail(&self, reason: &str) {
        warn!(reason, "dictionary load failed");
        self.set(DictionaryState::Failed);
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<DictionaryState> {
        self.state_rx.clone()
    }
}
