//! Dictionary model and response parsing.
//! Keys are CRC-32 hashes of the original, unescaped text; an explicit null
//! entry means "known untranslated, never re-report". The dictionary is
//! replaced wholesale on every successful load, never merged.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

use super::LoadError;

/// Wire format of the translation service response. Hash keys arrive as
/// decimal strings.
#[derive(Debug, Deserialize)]
struct TranslationResponse {
    success: i64,
    #[serde(default)]
    translation: HashMap<String, Option<String>>,
}

/// Outcome of a single hash lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// A translation exists for this hash.
    Translated(String),
    /// The hash is known but has no translation yet; do not re-report.
    KnownGap,
    /// The hash is unknown; a report candidate.
    Miss,
}

/// In-memory translation dictionary.
#[derive(Debug, Default)]
pub struct Dictionary {
    entries: HashMap<u32, Option<String>>,
}

impl Dictionary {
    /// Parse a raw response body into a dictionary. `success != 1` is a
    /// protocol error even when the body is well-formed JSON. Entries whose
    /// key is not a `u32` hash are skipped.
    pub fn parse_response(bytes: &[u8]) -> Result<Self, LoadError> {
        let response: TranslationResponse = serde_json::from_slice(bytes)?;
        if response.success != 1 {
            return Err(LoadError::Protocol(response.success));
        }

        let mut entries = HashMap::with_capacity(response.translation.len());
        for (hash, entry) in response.translation {
            match hash.parse::<u32>() {
                Ok(hash) => {
                    entries.insert(hash, entry);
                }
                Err(_) => warn!(hash = %hash, "dictionary key is not a u32 hash, skipped"),
            }
        }
        Ok(Self { entries })
    }

    pub fn lookup(&self, hash: u32) -> Lookup {
        match self.entries.get(&hash) {
            Some(Some(text)) => Lookup::Translated(text.clone()),
            Some(None) => Lookup::KnownGap,
            None => Lookup::Miss,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
