//! Core types for AcquireKit

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request to scrape a web page
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ScrapeRequest {
    /// The URL of the web page to scrape (must be http:// or https://)
    #[serde(default)]
    pub url: Option<String>,
}

impl ScrapeRequest {
    /// Create a new request with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

/// Request to fetch a YouTube transcript
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptRequest {
    /// The URL of the YouTube video, e.g. https://www.youtube.com/watch?v=ID or https://youtu.be/ID
    #[serde(default)]
    pub url: Option<String>,
}

impl TranscriptRequest {
    /// Create a new request with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

/// Title and body extracted from a payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub title: Option<String>,
    pub body: String,
}

impl NormalizedResult {
    /// Render as `Title: {title}\n\nTranscript:\n{body}`
    ///
    /// A missing title renders as an empty string.
    pub fn render_transcript(&self) -> String {
        format!(
            "Title: {}\n\nTranscript:\n{}",
            self.title.as_deref().unwrap_or_default(),
            self.body
        )
    }
}

/// Successful outcome of a tool invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acquired {
    /// The reference as supplied by the caller
    pub reference: String,
    /// Resolved title, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Final output text handed back to the assistant
    pub content: String,
}

/// Payload returned by a transcript source
#[derive(Debug, Clone)]
pub enum TranscriptPayload {
    /// Structured API record with per-language segment lists
    Record(TranscriptRecord),
    /// Already-localized documents
    Documents(Vec<TranscriptDocument>),
}

/// Structured transcript API response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<TranscriptData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptData {
    #[serde(rename = "videoInfo", default)]
    pub video_info: Option<VideoInfo>,
    /// Language code -> tracks
    #[serde(default)]
    pub transcripts: BTreeMap<String, LanguageTracks>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub name: Option<String>,
}

/// Segment lists available for one language
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageTracks {
    #[serde(default)]
    pub auto: Option<Vec<TranscriptSegment>>,
}

impl LanguageTracks {
    pub fn auto_segments(&self) -> &[TranscriptSegment] {
        self.auto.as_deref().unwrap_or_default()
    }
}

/// One unit of transcript text, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    #[serde(default)]
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Localized transcript document from a loader service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptDocument {
    #[serde(alias = "pageContent")]
    pub page_content: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_transcript() {
        let result = NormalizedResult {
            title: Some("Talk".to_string()),
            body: "a b".to_string(),
        };
        assert_eq!(result.render_transcript(), "Title: Talk\n\nTranscript:\na b");
    }

    #[test]
    fn test_record_deserialization() {
        let json = r#"{
            "code": 100000,
            "message": "success",
            "data": {
                "videoInfo": {"name": "Demo", "author": "someone"},
                "transcripts": {
                    "en_auto": {
                        "auto": [{"start": "00:00:00", "end": "00:00:02", "text": "hi"}],
                        "custom": []
                    }
                }
            }
        }"#;
        let record: TranscriptRecord = serde_json::from_str(json).unwrap();
        let data = record.data.unwrap();
        assert_eq!(record.code, 100000);
        assert_eq!(data.video_info.unwrap().name.as_deref(), Some("Demo"));
        assert_eq!(data.transcripts["en_auto"].auto_segments()[0].text, "hi");
    }

    #[test]
    fn test_record_without_data() {
        let record: TranscriptRecord =
            serde_json::from_str(r#"{"code": 400, "message": "bad id", "data": null}"#).unwrap();
        assert!(record.data.is_none());
        assert_eq!(record.message, "bad id");
    }

    #[test]
    fn test_null_auto_track() {
        let tracks: LanguageTracks = serde_json::from_str(r#"{"auto": null}"#).unwrap();
        assert!(tracks.auto_segments().is_empty());
    }

    #[test]
    fn test_document_aliases() {
        let doc: TranscriptDocument = serde_json::from_str(
            r#"{"pageContent": "hello", "metadata": {"title": "T", "view_count": 3}}"#,
        )
        .unwrap();
        assert_eq!(doc.page_content, "hello");
        assert_eq!(doc.metadata.title.as_deref(), Some("T"));
        assert_eq!(doc.metadata.extra["view_count"], 3);

        let doc: TranscriptDocument =
            serde_json::from_str(r#"{"page_content": "hello"}"#).unwrap();
        assert!(doc.metadata.title.is_none());
    }

    #[test]
    fn test_request_serialization() {
        let req = TranscriptRequest::new("https://youtu.be/abc");
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"url\":\"https://youtu.be/abc\""));

        let req: ScrapeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.url.is_none());
    }

    #[test]
    fn test_acquired_serialization() {
        let acquired = Acquired {
            reference: "https://example.com".to_string(),
            title: None,
            content: "text".to_string(),
        };
        let json = serde_json::to_string(&acquired).unwrap();
        assert!(!json.contains("title"));
    }
}
