//! Transcript loader service source
//!
//! Posts the video URL with language preferences and an optional translation
//! target; the service answers with localized documents. Translation happens
//! on the service side.

use super::{HttpSettings, TranscriptQuery, TranscriptSource};
use crate::error::AcquireError;
use crate::types::{TranscriptDocument, TranscriptPayload};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Body of a loader request
#[derive(Debug, Serialize)]
struct LoadRequest<'a> {
    url: &'a str,
    add_video_info: bool,
    language: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    translation: Option<&'a str>,
}

/// Loader service source
#[derive(Debug, Clone)]
pub struct TranscriptLoaderSource {
    endpoint: String,
    http: HttpSettings,
}

impl TranscriptLoaderSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
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
}

#[async_trait]
impl TranscriptSource for TranscriptLoaderSource {
    fn name(&self) -> &'static str {
        "transcript_loader"
    }

    async fn fetch(&self, query: &TranscriptQuery<'_>) -> Result<TranscriptPayload, AcquireError> {
        let client = self.http.client()?;
        let request = LoadRequest {
            url: query.url,
            add_video_info: true,
            language: query.languages,
            translation: query.translate_to,
        };
        debug!(endpoint = %self.endpoint, languages = ?query.languages, "Requesting transcript loader");

        let response = client
            .post(&self.endpoint)
            .json(&request)
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

        let documents: Vec<TranscriptDocument> = serde_json::from_str(&body)
            .map_err(|e| AcquireError::InvalidResponse(e.to_string()))?;

        Ok(TranscriptPayload::Documents(documents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_request_body() {
        let languages = vec!["en".to_string(), "en_auto".to_string()];
        let request = LoadRequest {
            url: "https://youtu.be/abc",
            add_video_info: true,
            language: &languages,
            translation: Some("it"),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["url"], "https://youtu.be/abc");
        assert_eq!(json["add_video_info"], true);
        assert_eq!(json["language"][1], "en_auto");
        assert_eq!(json["translation"], "it");
    }

    #[test]
    fn test_load_request_without_translation() {
        let request = LoadRequest {
            url: "https://youtu.be/abc",
            add_video_info: true,
            language: &[],
            translation: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("translation").is_none());
    }
}
