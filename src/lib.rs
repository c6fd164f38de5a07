//! kctrans: hash-keyed JSON translation engine for intercepted game API
//! traffic. Rewrites every string leaf of an API document through a
//! CRC-32-keyed dictionary fetched from a remote service and cached on disk,
//! and reports unknown strings back through a blacklist-gated side channel.

mod document;
mod generation;
pub mod metrics;
pub mod state;
pub mod timefix;
pub mod translate;

pub use state::DictionaryState;
pub use translate::blacklist::ReportBlacklist;
pub use translate::{EngineConfig, LoadError, Translator};

/// Install the default tracing subscriber. Hosts that configure their own
/// subscriber skip this.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kctrans=debug".parse().unwrap()),
        )
        .with_target(true)
        .init();
}
