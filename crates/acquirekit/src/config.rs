//! Tool configuration
//!
//! Each tool has a global configuration, fixed when the tool is built, and
//! an optional per-user configuration supplied with each invocation. A user
//! value wins when present and non-empty, then the global value, then the
//! built-in default.

use std::time::Duration;

/// Default reader proxy prefix
pub const DEFAULT_READER_BASE: &str = "https://r.jina.ai/";

/// Default structured transcript API endpoint
pub const DEFAULT_TRANSCRIPT_API: &str = "https://notegpt.io/api/v2/video-transcript";

/// Default transcript language preferences, highest priority first
pub const DEFAULT_LANGUAGES: &[&str] = &["en", "en_auto"];

/// Default translation target for the loader source
pub const DEFAULT_TRANSLATION: &str = "en";

/// Default request timeout for remote sources
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Global scrape configuration
#[derive(Debug, Clone, Default)]
pub struct ScrapeConfig {
    /// Ask the reader proxy to bypass its cache
    pub disable_caching: bool,
    /// Reader API key used when the user has none
    pub global_api_key: Option<String>,
}

/// Per-user scrape overrides
#[derive(Debug, Clone, Default)]
pub struct UserScrapeConfig {
    /// Strip parenthesized links from the scraped text
    pub clean_content: Option<bool>,
    /// Reader API key for this user
    pub api_key: Option<String>,
}

impl ScrapeConfig {
    /// Resolve the bearer credential for an invocation
    pub fn api_key(&self, user: Option<&UserScrapeConfig>) -> Option<String> {
        pick(
            user.and_then(|u| u.api_key.as_deref()),
            self.global_api_key.as_deref(),
        )
    }

    /// Whether links are stripped for an invocation
    pub fn clean_content(&self, user: Option<&UserScrapeConfig>) -> bool {
        user.and_then(|u| u.clean_content).unwrap_or(true)
    }
}

/// Global transcript configuration
#[derive(Debug, Clone)]
pub struct TranscriptConfig {
    /// Language preferences, highest priority first
    pub languages: Vec<String>,
    /// Target language the loader service should translate to
    pub translate_to: Option<String>,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            translate_to: Some(DEFAULT_TRANSLATION.to_string()),
        }
    }
}

/// Per-user transcript overrides
#[derive(Debug, Clone, Default)]
pub struct UserTranscriptConfig {
    pub languages: Option<Vec<String>>,
    pub translate_to: Option<String>,
}

impl TranscriptConfig {
    /// Resolve language preferences for an invocation
    pub fn languages(&self, user: Option<&UserTranscriptConfig>) -> Vec<String> {
        if let Some(languages) = user
            .and_then(|u| u.languages.as_ref())
            .filter(|l| !l.is_empty())
        {
            return languages.clone();
        }
        if !self.languages.is_empty() {
            return self.languages.clone();
        }
        DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
    }

    /// Resolve the translation target for an invocation
    pub fn translate_to(&self, user: Option<&UserTranscriptConfig>) -> Option<String> {
        pick(
            user.and_then(|u| u.translate_to.as_deref()),
            self.translate_to.as_deref(),
        )
    }
}

/// Parse a comma-separated language list, e.g. `"en, en_auto"`
pub fn parse_languages(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn pick(user: Option<&str>, global: Option<&str>) -> Option<String> {
    user.filter(|v| !v.is_empty())
        .or_else(|| global.filter(|v| !v.is_empty()))
        .map(str::to_string)
}
