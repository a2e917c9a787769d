//! Structured transcript API source
//!
//! `GET {endpoint}?platform=youtube&video_id={id}` answers with
//! `{code, message, data: {videoInfo: {name}, transcripts: {lang: {auto: [...]}}}}`.

use super::{HttpSettings, TranscriptQuery, TranscriptSource};
use crate::config::DEFAULT_TRANSCRIPT_API;
use crate::error::AcquireError;
use crate::types::{TranscriptPayload, TranscriptRecord};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Application-level code the API uses for success
pub const TRANSCRIPT_API_SUCCESS: i64 = 100000;

/// Platform marker sent with every lookup
const PLATFORM: &str = "youtube";

/// Transcript API source
#[derive(Debug, Clone)]
pub struct TranscriptApiSource {
    endpoint: String,
    http: HttpSettings,
}

impl Default for TranscriptApiSource {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSCRIPT_API)
    }
}

impl TranscriptApiSource {
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

    fn request_url(&self, video_id: &str) -> Result<Url, AcquireError> {
        Url::parse_with_params(
            &self.endpoint,
            &[("platform", PLATFORM), ("video_id", video_id)],
        )
        .map_err(|e| AcquireError::RequestError(format!("Invalid transcript endpoint: {}", e)))
    }
}

/// Check a decoded record for the success code
fn check_record(record: TranscriptRecord) -> Result<TranscriptRecord, AcquireError> {
    if record.code != TRANSCRIPT_API_SUCCESS {
        return Err(AcquireError::ServiceError(record.message));
    }
    Ok(record)
}

/// Classify a non-200 answer
///
/// A record with a failure code keeps its message; anything else, including
/// a record claiming success, is reported with status and body.
fn status_error(status: u16, body: String) -> AcquireError {
    match serde_json::from_str::<TranscriptRecord>(&body) {
        Ok(record) if record.code != TRANSCRIPT_API_SUCCESS => {
            AcquireError::ServiceError(record.message)
        }
        _ => AcquireError::HttpStatus { status, body },
    }
}

#[async_trait]
impl TranscriptSource for TranscriptApiSource {
    fn name(&self) -> &'static str {
        "transcript_api"
    }

    async fn fetch(&self, query: &TranscriptQuery<'_>) -> Result<TranscriptPayload, AcquireError> {
        let client = self.http.client()?;
        let url = self.request_url(query.video_id.as_str())?;
        debug!(url = %url, "Requesting transcript API");

        let response = client
            .get(url)
            .send()
            .await
            .map_err(AcquireError::from_reqwest)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(AcquireError::from_reqwest)?;

        if status != 200 {
            warn!(status, "Transcript API returned an error status");
            return Err(status_error(status, body));
        }

        let record: TranscriptRecord = serde_json::from_str(&body)
            .map_err(|e| AcquireError::InvalidResponse(e.to_string()))?;

        check_record(record).map(TranscriptPayload::Record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url() {
        let source = TranscriptApiSource::default();
        let url = source.request_url("abc123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://notegpt.io/api/v2/video-transcript?platform=youtube&video_id=abc123"
        );
    }

    #[test]
    fn test_request_url_escapes_id() {
        let source = TranscriptApiSource::new("http://localhost:8080/transcript");
        let url = source.request_url("a b#c").unwrap();
        assert_eq!(url.query(), Some("platform=youtube&video_id=a+b%23c"));
    }

    #[test]
    fn test_invalid_endpoint() {
        let source = TranscriptApiSource::new("not a url");
        assert!(matches!(
            source.request_url("abc"),
            Err(AcquireError::RequestError(_))
        ));
    }

    #[test]
    fn test_check_record() {
        let ok = TranscriptRecord {
            code: TRANSCRIPT_API_SUCCESS,
            ..Default::default()
        };
        assert!(check_record(ok).is_ok());

        let failed = TranscriptRecord {
            code: 400,
            message: "Video has no subtitles".to_string(),
            data: None,
        };
        match check_record(failed) {
            Err(AcquireError::ServiceError(message)) => {
                assert_eq!(message, "Video has no subtitles")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_status_error_keeps_service_message() {
        let body = r#"{"code":429,"message":"Too many requests","data":null}"#.to_string();
        match status_error(429, body) {
            AcquireError::ServiceError(message) => assert_eq!(message, "Too many requests"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_status_error_without_code() {
        let body = r#"{"message":"Too many requests"}"#.to_string();
        assert_eq!(
            status_error(429, body).to_string(),
            r#"HTTP 429: {"message":"Too many requests"}"#
        );
    }

    #[test]
    fn test_status_error_never_succeeds() {
        let body = r#"{"code":100000,"message":"success","data":null}"#.to_string();
        assert!(matches!(
            status_error(500, body),
            AcquireError::HttpStatus { status: 500, .. }
        ));
    }
}
