//! Remote sources for raw content
//!
//! Design: sources only talk to the network and classify failures into
//! [`AcquireError`]. They never report status; the pipeline does.

mod reader;
mod transcript_api;
mod transcript_loader;

pub use reader::ReaderSource;
pub use transcript_api::{TranscriptApiSource, TRANSCRIPT_API_SUCCESS};
pub use transcript_loader::TranscriptLoaderSource;

use crate::config::DEFAULT_TIMEOUT;
use crate::error::AcquireError;
use crate::extract::VideoId;
use crate::types::TranscriptPayload;
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, USER_AGENT};
use std::time::Duration;

/// Header values forwarded to the scrape source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeHeaders {
    /// Ask the proxy to bypass its cache
    pub no_cache: bool,
    /// Bearer credential, if configured
    pub bearer: Option<String>,
}

/// Source returning readable text for a web page
#[async_trait]
pub trait ScrapeSource: Send + Sync {
    /// Identifier for logging
    fn name(&self) -> &'static str;

    /// Fetch the page text for `url`
    async fn scrape(&self, url: &str, headers: &ScrapeHeaders) -> Result<String, AcquireError>;
}

/// Everything a transcript source may need for one lookup
#[derive(Debug, Clone)]
pub struct TranscriptQuery<'a> {
    /// The reference as supplied by the caller
    pub url: &'a str,
    pub video_id: &'a VideoId,
    /// Language preferences, highest priority first
    pub languages: &'a [String],
    pub translate_to: Option<&'a str>,
}

/// Source returning transcript payloads
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Identifier for logging
    fn name(&self) -> &'static str;

    async fn fetch(&self, query: &TranscriptQuery<'_>) -> Result<TranscriptPayload, AcquireError>;
}

/// HTTP settings shared by the built-in sources
#[derive(Debug, Clone)]
pub(crate) struct HttpSettings {
    pub user_agent: Option<String>,
    pub timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpSettings {
    pub fn client(&self) -> Result<reqwest::Client, AcquireError> {
        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );

        reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()
            .map_err(AcquireError::ClientBuildError)
    }
}
