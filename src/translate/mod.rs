//! Translation engine: dictionary lifecycle, the async-to-blocking readiness
//! adaptation, and the per-line translation entry point.

pub mod blacklist;
pub mod cache;
pub mod dictionary;
pub mod line;
pub mod remote;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::generation::LoadGeneration;
use crate::metrics::{counter_names, MetricsRegistry};
use crate::state::{DictionaryState, StateCell};

use blacklist::ReportBlacklist;
use cache::CacheFile;
use dictionary::Dictionary;
use remote::RemoteClient;

/// Engine configuration. Construct with `Default` and override field-wise.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the translation service.
    pub api_base: String,
    /// Location of the single-file dictionary cache.
    pub cache_path: PathBuf,
    /// Whether unknown lines are reported back to the service.
    pub report_untranslated: bool,
    /// Upper bound on how long a translation call waits for an in-flight
    /// dictionary load before degrading to passthrough.
    pub load_wait_timeout: Duration,
    /// Minimum interval between untranslated-line reports. Excess report
    /// candidates are dropped, not queued.
    pub min_report_interval: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_base: "http://api.comeonandsl.am".to_string(),
            cache_path: CacheFile::default_path(),
            report_untranslated: true,
            load_wait_timeout: Duration::from_secs(30),
            min_report_interval: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Failure modes of a dictionary load. All of them degrade to "use the
/// original text" at the translation boundary.
#[derive(Debug)]
pub enum LoadError {
    /// Transport failure talking to the translation service.
    Network(String),
    /// Malformed dictionary response body.
    Parse(serde_json::Error),
    /// Well-formed response whose `success` flag was not 1.
    Protocol(i64),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Network(msg) => write!(f, "network error: {msg}"),
            LoadError::Parse(e) => write!(f, "dictionary parse error: {e}"),
            LoadError::Protocol(code) => write!(f, "API error {code}"),
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Parse(e)
    }
}

/// The translation engine. One owned instance per process, shared by
/// reference with every consumer; there is no implicit re-creation.
pub struct Translator {
    config: EngineConfig,
    state: StateCell,
    dictionary: RwLock<Dictionary>,
    blacklist: ReportBlacklist,
    remote: RemoteClient,
    cache: CacheFile,
    loads: LoadGeneration,
    metrics: MetricsRegistry,
    next_report_allowed: Mutex<Instant>,
}

impl Translator {
    /// Build an engine with the blacklist bundled into the binary.
    pub fn new(config: EngineConfig) -> Result<Self, LoadError> {
        Self::with_blacklist(config, ReportBlacklist::bundled())
    }

    /// Build an engine with a caller-supplied report blacklist.
    pub fn with_blacklist(
        config: EngineConfig,
        blacklist: ReportBlacklist,
    ) -> Result<Self, LoadError> {
        let remote = RemoteClient::new(&config.api_base, config.request_timeout)?;
        let cache = CacheFile::new(config.cache_path.clone());
        Ok(Self {
            remote,
            cache,
            state: StateCell::new(),
            dictionary: RwLock::new(Dictionary::default()),
            blacklist,
            loads: LoadGeneration::new(),
            metrics: MetricsRegistry::new(),
            next_report_allowed: Mutex::new(Instant::now()),
            config,
        })
    }

    /// Whether the dictionary is ready to use.
    pub fn is_loaded(&self) -> bool {
        self.state.current() == DictionaryState::Loaded
    }

    /// Current readiness state.
    pub fn state(&self) -> DictionaryState {
        self.state.current()
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Start loading the dictionary for `language`. The cached copy, if one
    /// exists, is installed synchronously so translation is available while
    /// the network fetch is in flight; the fetch outcome then decides the
    /// final state. Calling again while a load is in flight supersedes it.
    pub fn load_translation(self: &Arc<Self>, language: &str) {
        self.state.set(DictionaryState::Loading);

        if let Some(bytes) = self.cache.read() {
            match self.install_dictionary(&bytes) {
                Ok(()) => {
                    self.metrics.incr(counter_names::CACHE_HITS);
                    info!("cached dictionary installed while the fetch is in flight");
                }
                Err(e) => warn!(error = %e, "cached dictionary unusable, waiting for the fetch"),
            }
        }

        let (token, generation) = self.loads.advance();
        let this = Arc::clone(self);
        let language = language.to_string();
        tokio::spawn(async move {
            let fetched = tokio::select! {
                result = this.remote.fetch_dictionary(&language) => result,
                _ = token.cancelled() => {
                    debug!(generation, "dictionary fetch superseded, dropping");
                    return;
                }
            };
            if !this.loads.is_current(generation) {
                debug!(generation, "stale dictionary fetch completion discarded");
                return;
            }
            match fetched {
                Ok(bytes) => match Dictionary::parse_response(&bytes) {
                    Ok(dict) => {
                        // Only validated bytes ever reach the cache; a write
                        // failure is logged and swallowed.
                        if let Err(e) = this.cache.write(&bytes) {
                            this.metrics.incr(counter_names::CACHE_WRITE_FAILURES);
                            warn!(error = %e, "couldn't write dictionary cache");
                        }
                        this.commit_dictionary(dict);
                        this.metrics.incr(counter_names::LOADS_SUCCEEDED);
                    }
                    Err(e) => {
                        this.metrics.incr(counter_names::LOADS_FAILED);
                        this.state.fail(&e.to_string());
                    }
                },
                Err(e) => {
                    this.metrics.incr(counter_names::LOADS_FAILED);
                    this.state.fail(&e.to_string());
                }
            }
        });
    }

    /// Parse and install a raw dictionary response. The load path uses this
    /// for cached bytes; hosts can use it to seed a dictionary offline.
    pub fn install_dictionary(&self, bytes: &[u8]) -> Result<(), LoadError> {
        let dictionary = Dictionary::parse_response(bytes)?;
        self.commit_dictionary(dictionary);
        Ok(())
    }

    fn commit_dictionary(&self, dictionary: Dictionary) {
        info!(entries = dictionary.len(), "translation dictionary installed");
        *self.dictionary.write() = dictionary;
        self.state.set(DictionaryState::Loaded);
    }

    /// Translate a single line in the context of `(endpoint, key)`.
    /// Suspends while a dictionary load is in flight; with no load started,
    /// or after a failed one, the original line comes back immediately.
    pub async fn translate(&self, raw: &str, endpoint: &str, key: &str) -> String {
        if !self.await_ready().await {
            return raw.to_string();
        }
        self.translate_line(raw, endpoint, key)
    }

    /// Wait for a terminal dictionary state, bounded by the configured
    /// timeout. Returns whether the dictionary ended up usable.
    pub(crate) async fn await_ready(&self) -> bool {
        match self.state.current() {
            DictionaryState::Loaded => true,
            DictionaryState::Created | DictionaryState::Failed => false,
            DictionaryState::Loading => {
                let mut rx = self.state.subscribe();
                let waited = tokio::time::timeout(
                    self.config.load_wait_timeout,
                    rx.wait_for(|state| state.is_terminal()),
                )
                .await;
                match waited {
                    Ok(Ok(state)) => *state == DictionaryState::Loaded,
                    Ok(Err(_)) => false,
                    Err(_) => {
                        warn!("timed out waiting for the dictionary load, passing text through");
                        false
                    }
                }
            }
        }
    }

    /// Submit an untranslated-line report, rate limited by the configured
    /// minimum interval. Fire and forget; the response is ignored.
    pub(crate) fn try_report(&self, endpoint: &str, text: &str) {
        {
            let mut next_allowed = self.next_report_allowed.lock();
            let now = Instant::now();
            if now < *next_allowed {
                self.metrics.incr(counter_names::REPORTS_DROPPED);
                return;
            }
            *next_allowed = now + self.config.min_report_interval;
        }
        info!(endpoint, text, "reporting untranslated line");
        self.metrics.incr(counter_names::REPORTS_SENT);
        let remote = self.remote.clone();
        let endpoint = endpoint.to_string();
        let text = text.to_string();
        tokio::spawn(async move {
            if let Err(e) = remote.report_untranslated(&endpoint, &text).await {
                debug!(error = %e, "untranslated report failed");
            }
        });
    }
}
