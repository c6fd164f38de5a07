//! JSON tree walker: rewrites string leaves of an API document in place,
//! preserving structure, key order, and the optional `svdata=` framing
//! prefix some endpoints use.

use serde_json::Value;
use tracing::debug;

use crate::metrics::counter_names;
use crate::timefix;
use crate::translate::Translator;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const SVDATA_PREFIX: &[u8] = b"svdata=";

/// The one field that carries a timestamp to correct instead of text to
/// translate.
const COMPLETE_TIME_KEY: &str = "api_complete_time_str";

impl Translator {
    /// Rewrite a raw document: strip the BOM, strip and remember the
    /// `svdata=` prefix, translate every string leaf, and re-serialize
    /// compactly. Input that does not parse as JSON comes back unchanged.
    pub async fn translate_document(&self, input: &[u8], endpoint: &str) -> Vec<u8> {
        let body = input.strip_prefix(&UTF8_BOM[..]).unwrap_or(input);
        let (payload, has_prefix) = match body.strip_prefix(SVDATA_PREFIX) {
            Some(rest) => (rest, true),
            None => (body, false),
        };

        let mut value: Value = match serde_json::from_slice(payload) {
            Ok(value) => value,
            Err(e) => {
                debug!(endpoint, error = %e, "document is not JSON, passing through");
                self.metrics().incr(counter_names::DOCS_PASSED_THROUGH);
                return input.to_vec();
            }
        };

        // Readiness is settled once per document; every leaf below shares
        // the outcome. The timestamp fixup applies either way.
        let ready = self.await_ready().await;
        self.walk(&mut value, endpoint, "", ready);

        let rewritten = match serde_json::to_vec(&value) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(endpoint, error = %e, "re-serialization failed, passing through");
                self.metrics().incr(counter_names::DOCS_PASSED_THROUGH);
                return input.to_vec();
            }
        };
        self.metrics().incr(counter_names::DOCS_TRANSLATED);

        if has_prefix {
            let mut out = Vec::with_capacity(SVDATA_PREFIX.len() + rewritten.len());
            out.extend_from_slice(SVDATA_PREFIX);
            out.extend_from_slice(&rewritten);
            out
        } else {
            rewritten
        }
    }

    /// Recursive descent. Object members pass their key down as field
    /// context; arrays propagate the enclosing member's key unchanged.
    fn walk(&self, value: &mut Value, endpoint: &str, key: &str, ready: bool) {
        match value {
            Value::Object(members) => {
                for (member_key, member) in members.iter_mut() {
                    self.walk(member, endpoint, member_key, ready);
                }
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.walk(item, endpoint, key, ready);
                }
            }
            Value::String(text) => {
                if key == COMPLETE_TIME_KEY {
                    *text = timefix::fix_time(text);
                } else if ready {
                    *text = self.translate_line(text, endpoint, key);
                }
            }
            // Numbers, bools, and nulls are returned unchanged.
            _ => {}
        }
    }
}
