//! HTTP client for the translation service: the language-parameterized
//! dictionary fetch and the fire-and-forget untranslated-line report.

use std::time::Duration;

use tracing::debug;

use super::LoadError;

#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, LoadError> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .timeout(request_timeout)
            .build()
            .map_err(|e| LoadError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn dictionary_url(&self, language: &str) -> String {
        format!("{}/translation/{}/", self.base_url, language)
    }

    fn report_url(&self, endpoint: &str) -> String {
        format!("{}/report/{}", self.base_url, endpoint)
    }

    /// GET the dictionary for `language`, returning the raw body bytes so
    /// the caller can cache exactly what was served.
    pub async fn fetch_dictionary(&self, language: &str) -> Result<Vec<u8>, LoadError> {
        let url = self.dictionary_url(language);
        debug!(url = %url, "fetching translation dictionary");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(LoadError::Network(format!(
                "dictionary fetch returned {}",
                response.status()
            )));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        Ok(body.to_vec())
    }

    /// POST an untranslated line, URL-encoded as `value=<text>`, to the
    /// endpoint-tagged report URL. The response body is ignored.
    pub async fn report_untranslated(&self, endpoint: &str, text: &str) -> Result<(), LoadError> {
        self.http
            .post(self.report_url(endpoint))
            .form(&[("value", text)])
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        Ok(())
    }
}
