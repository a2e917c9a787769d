//! Convenience entry points for AcquireKit
//!
//! These run the pipelines with default configuration and no status channel.
//! For custom sources, credentials, or language preferences use
//! [`ScrapeTool`](crate::ScrapeTool) and [`TranscriptTool`](crate::TranscriptTool).

use crate::error::AcquireError;
use crate::tool::{ScrapeTool, TranscriptTool};
use crate::types::Acquired;

/// Scrape a web page through the default reader proxy
pub async fn scrape(url: &str) -> Result<Acquired, AcquireError> {
    ScrapeTool::default().run(Some(url), None, None).await
}

/// Fetch a YouTube transcript from the default transcript API
pub async fn youtube_transcript(url: &str) -> Result<Acquired, AcquireError> {
    TranscriptTool::default().run(Some(url), None, None).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scrape_empty_url() {
        let result = scrape("").await;
        assert!(matches!(result, Err(AcquireError::MissingUrl)));
    }

    #[tokio::test]
    async fn test_scrape_invalid_scheme() {
        let result = scrape("ftp://example.com").await;
        assert!(matches!(result, Err(AcquireError::InvalidUrlScheme)));
    }

    #[tokio::test]
    async fn test_transcript_invalid_url() {
        let result = youtube_transcript("https://www.example.com/invalid").await;
        assert!(matches!(result, Err(AcquireError::InvalidVideoUrl(_))));
    }

    #[tokio::test]
    async fn test_transcript_placeholder() {
        let result = youtube_transcript("https://youtu.be/dQw4w9WgXcQ").await;
        assert!(matches!(result, Err(AcquireError::PlaceholderVideo)));

        let result = youtube_transcript("").await;
        assert!(matches!(result, Err(AcquireError::InvalidVideoUrl(_))));
    }
}
