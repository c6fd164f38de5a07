//! Per-endpoint report blacklist, bundled into the binary. Field keys listed
//! here are known non-translatable: the line translator returns them as-is,
//! skipping the dictionary lookup and the report.

use std::collections::{HashMap, HashSet};

use tracing::warn;

const BUNDLED: &str = include_str!("../../data/report_blacklist.json");

pub struct ReportBlacklist {
    endpoints: HashMap<String, HashSet<String>>,
    loaded: bool,
}

impl ReportBlacklist {
    /// The blacklist shipped with the binary. Falls back to `empty` if the
    /// bundled data is unusable, which disables reporting entirely rather
    /// than flooding the report endpoint against missing data.
    pub fn bundled() -> Self {
        match Self::from_json(BUNDLED) {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "bundled report blacklist unusable, reporting disabled");
                Self::empty()
            }
        }
    }

    /// Parse a blacklist from a JSON object of endpoint → field key array.
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(data)?;
        let endpoints = raw
            .into_iter()
            .map(|(endpoint, keys)| (endpoint, keys.into_iter().collect()))
            .collect();
        Ok(Self {
            endpoints,
            loaded: true,
        })
    }

    /// An absent blacklist; `is_loaded` stays false so the engine never
    /// reports against missing data.
    pub fn empty() -> Self {
        Self {
            endpoints: HashMap::new(),
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_listed(&self, endpoint: &str, key: &str) -> bool {
        self.endpoints
            .get(endpoint)
            .is_some_and(|keys| keys.contains(key))
    }
}
