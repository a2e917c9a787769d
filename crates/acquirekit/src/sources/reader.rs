//! Reader proxy scrape source
//!
//! The page URL is appended to the proxy prefix (`https://r.jina.ai/{url}`)
//! and the proxy answers with readable text, starting with a `Title:` line.

use super::{HttpSettings, ScrapeHeaders, ScrapeSource};
use crate::config::DEFAULT_READER_BASE;
use crate::error::AcquireError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::time::Duration;
use tracing::{debug, warn};

/// Reader proxy source
#[derive(Debug, Clone)]
pub struct ReaderSource {
    base: String,
    http: HttpSettings,
}

impl Default for ReaderSource {
    fn default() -> Self {
        Self::new(DEFAULT_READER_BASE)
    }
}

impl ReaderSource {
    /// Create a source for the given proxy prefix
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            http: HttpSettings::default(),
        }
    }

    /// Set a custom User-Agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http.user_agent = Some(user_agent.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }

    fn proxy_url(&self, url: &str) -> String {
        format!("{}{}", self.base, url)
    }
}

fn build_headers(headers: &ScrapeHeaders) -> HeaderMap {
    let mut map = HeaderMap::new();
    map.insert(
        "x-no-cache",
        HeaderValue::from_static(if headers.no_cache { "true" } else { "false" }),
    );
    map.insert("x-with-generated-alt", HeaderValue::from_static("true"));

    if let Some(key) = headers.bearer.as_deref() {
        match HeaderValue::from_str(&format!("Bearer {}", key)) {
            Ok(value) => {
                map.insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("API key contains invalid header characters, sending without it"),
        }
    }
    map
}

#[async_trait]
impl ScrapeSource for ReaderSource {
    fn name(&self) -> &'static str {
        "reader"
    }

    async fn scrape(&self, url: &str, headers: &ScrapeHeaders) -> Result<String, AcquireError> {
        let client = self.http.client()?;
        let proxy_url = self.proxy_url(url);
        debug!(url = %proxy_url, authorized = headers.bearer.is_some(), "Requesting reader proxy");

        let response = client
            .get(&proxy_url)
            .headers(build_headers(headers))
            .send()
            .await
            .map_err(AcquireError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(AcquireError::from_reqwest)?;

        if !status.is_success() {
            return Err(AcquireError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
