//! Tool builders and contract for AcquireKit

use crate::config::{
    ScrapeConfig, TranscriptConfig, UserScrapeConfig, UserTranscriptConfig, DEFAULT_READER_BASE,
    DEFAULT_TIMEOUT, DEFAULT_TRANSCRIPT_API,
};
use crate::error::AcquireError;
use crate::pipeline::{run_scrape, run_transcript, scrape_error_message, transcript_error_message};
use crate::sources::{
    ReaderSource, ScrapeSource, TranscriptApiSource, TranscriptLoaderSource, TranscriptSource,
};
use crate::status::StatusChannel;
use crate::types::{Acquired, ScrapeRequest, TranscriptRequest};
use crate::{SCRAPE_TOOL_DESCRIPTION, TOOL_LLMTXT, TRANSCRIPT_TOOL_DESCRIPTION};
use schemars::schema_for;
use std::sync::Arc;
use std::time::Duration;

/// Tool name the scrape tool is exposed under
pub const SCRAPE_TOOL_NAME: &str = "web_scrape";

/// Tool name the transcript tool is exposed under
pub const TRANSCRIPT_TOOL_NAME: &str = "youtube_transcript";

/// Builder for configuring the scrape tool
#[derive(Clone)]
pub struct ScrapeToolBuilder {
    reader_base: String,
    user_agent: Option<String>,
    timeout: Duration,
    config: ScrapeConfig,
    source: Option<Arc<dyn ScrapeSource>>,
}

impl Default for ScrapeToolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrapeToolBuilder {
    pub fn new() -> Self {
        Self {
            reader_base: DEFAULT_READER_BASE.to_string(),
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            config: ScrapeConfig::default(),
            source: None,
        }
    }

    /// Reader proxy prefix the page URL is appended to
    pub fn reader_base(mut self, base: impl Into<String>) -> Self {
        self.reader_base = base.into();
        self
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bypass the reader proxy cache
    pub fn disable_caching(mut self, disable: bool) -> Self {
        self.config.disable_caching = disable;
        self
    }

    /// Global API key, used when a user has none
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.global_api_key = Some(key.into());
        self
    }

    /// Replace the reader proxy with a custom source
    pub fn source(mut self, source: Arc<dyn ScrapeSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the tool
    pub fn build(self) -> ScrapeTool {
        let source = self.source.unwrap_or_else(|| {
            let mut reader = ReaderSource::new(self.reader_base).timeout(self.timeout);
            if let Some(ua) = self.user_agent {
                reader = reader.user_agent(ua);
            }
            Arc::new(reader)
        });
        ScrapeTool {
            source,
            config: self.config,
        }
    }
}

/// Configured web scrape tool
#[derive(Clone)]
pub struct ScrapeTool {
    source: Arc<dyn ScrapeSource>,
    config: ScrapeConfig,
}

impl Default for ScrapeTool {
    fn default() -> Self {
        ScrapeToolBuilder::new().build()
    }
}

impl ScrapeTool {
    /// Create a new tool builder
    pub fn builder() -> ScrapeToolBuilder {
        ScrapeToolBuilder::new()
    }

    pub fn name(&self) -> &'static str {
        SCRAPE_TOOL_NAME
    }

    /// Get tool description
    pub fn description(&self) -> &'static str {
        SCRAPE_TOOL_DESCRIPTION
    }

    /// Get full documentation (llmtxt)
    pub fn llmtxt(&self) -> &'static str {
        TOOL_LLMTXT
    }

    /// Get input schema as JSON
    pub fn input_schema(&self) -> serde_json::Value {
        let schema = schema_for!(ScrapeRequest);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Scrape a page, returning the tagged result
    pub async fn run(
        &self,
        url: Option<&str>,
        user: Option<&UserScrapeConfig>,
        channel: Option<&dyn StatusChannel>,
    ) -> Result<Acquired, AcquireError> {
        run_scrape(self.source.as_ref(), &self.config, user, url, channel).await
    }

    /// Scrape a page, returning the page text or an `Error: ...` string
    pub async fn invoke(
        &self,
        url: Option<&str>,
        user: Option<&UserScrapeConfig>,
        channel: Option<&dyn StatusChannel>,
    ) -> String {
        match self.run(url, user, channel).await {
            Ok(acquired) => acquired.content,
            Err(err) => scrape_error_message(&err),
        }
    }
}

/// Builder for configuring the transcript tool
#[derive(Clone)]
pub struct TranscriptToolBuilder {
    api_endpoint: String,
    loader_endpoint: Option<String>,
    user_agent: Option<String>,
    timeout: Duration,
    config: TranscriptConfig,
    source: Option<Arc<dyn TranscriptSource>>,
}

impl Default for TranscriptToolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptToolBuilder {
    pub fn new() -> Self {
        Self {
            api_endpoint: DEFAULT_TRANSCRIPT_API.to_string(),
            loader_endpoint: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            config: TranscriptConfig::default(),
            source: None,
        }
    }

    /// Structured transcript API endpoint
    pub fn api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    /// Use a loader service instead of the structured API
    pub fn loader_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.loader_endpoint = Some(endpoint.into());
        self
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Language preferences, highest priority first
    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Translation target passed to the loader service
    pub fn translate_to(mut self, language: Option<String>) -> Self {
        self.config.translate_to = language;
        self
    }

    /// Replace the built-in sources with a custom one
    pub fn source(mut self, source: Arc<dyn TranscriptSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the tool
    pub fn build(self) -> TranscriptTool {
        let source = match (self.source, self.loader_endpoint) {
            (Some(source), _) => source,
            (None, Some(endpoint)) => {
                let mut loader = TranscriptLoaderSource::new(endpoint).timeout(self.timeout);
                if let Some(ua) = self.user_agent {
                    loader = loader.user_agent(ua);
                }
                Arc::new(loader) as Arc<dyn TranscriptSource>
            }
            (None, None) => {
                let mut api = TranscriptApiSource::new(self.api_endpoint).timeout(self.timeout);
                if let Some(ua) = self.user_agent {
                    api = api.user_agent(ua);
                }
                Arc::new(api)
            }
        };
        TranscriptTool {
            source,
            config: self.config,
        }
    }
}

/// Configured YouTube transcript tool
#[derive(Clone)]
pub struct TranscriptTool {
    source: Arc<dyn TranscriptSource>,
    config: TranscriptConfig,
}

impl Default for TranscriptTool {
    fn default() -> Self {
        TranscriptToolBuilder::new().build()
    }
}

impl TranscriptTool {
    /// Create a new tool builder
    pub fn builder() -> TranscriptToolBuilder {
        TranscriptToolBuilder::new()
    }

    pub fn name(&self) -> &'static str {
        TRANSCRIPT_TOOL_NAME
    }

    /// Name of the configured source
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Get tool description
    pub fn description(&self) -> &'static str {
        TRANSCRIPT_TOOL_DESCRIPTION
    }

    /// Get full documentation (llmtxt)
    pub fn llmtxt(&self) -> &'static str {
        TOOL_LLMTXT
    }

    /// Get input schema as JSON
    pub fn input_schema(&self) -> serde_json::Value {
        let schema = schema_for!(TranscriptRequest);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Fetch a transcript, returning the tagged result
    pub async fn run(
        &self,
        url: Option<&str>,
        user: Option<&UserTranscriptConfig>,
        channel: Option<&dyn StatusChannel>,
    ) -> Result<Acquired, AcquireError> {
        run_transcript(self.source.as_ref(), &self.config, user, url, channel).await
    }

    /// Fetch a transcript, returning the rendered transcript or an `Error: ...` string
    pub async fn invoke(
        &self,
        url: Option<&str>,
        user: Option<&UserTranscriptConfig>,
        channel: Option<&dyn StatusChannel>,
    ) -> String {
        match self.run(url, user, channel).await {
            Ok(acquired) => acquired.content,
            Err(err) => transcript_error_message(&err),
        }
    }
}
