//! Error types for AcquireKit

use thiserror::Error;

/// Coarse classification of acquisition failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The reference could not be turned into an identifier
    InvalidReference,
    /// The reference points at the well-known example video
    PlaceholderReference,
    /// The remote call did not complete with a success indicator
    Transport,
    /// The remote call succeeded but yielded nothing usable
    EmptyResult,
    /// Anything else
    Unexpected,
}

/// Errors that can occur while acquiring content
#[derive(Debug, Error)]
pub enum AcquireError {
    /// URL is missing or empty
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// No video id could be extracted from the URL
    #[error("Invalid YouTube URL: {0}")]
    InvalidVideoUrl(String),

    /// The URL carries the placeholder video id
    #[error("No URL provided (except for Rick Roll ... is that what you want?).")]
    PlaceholderVideo,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Failed to connect to server
    #[error("Failed to connect to server: {0}")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Server answered with a non-success HTTP status
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Transcript service reported an application-level failure
    #[error("Transcript service error: {0}")]
    ServiceError(String),

    /// Response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),

    /// No transcript in any of the preferred languages
    #[error("Failed to find transcript for {reference}{}", format_available(.available))]
    TranscriptNotFound {
        reference: String,
        available: Vec<String>,
    },

    /// Scrape succeeded but the page had no text
    #[error("No content returned for {0}")]
    EmptyContent(String),

    /// Failure that escaped every other classification
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        String::new()
    } else {
        format!(" (available languages: {})", available.join(", "))
    }
}

impl AcquireError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AcquireError::Timeout(err)
        } else if err.is_connect() {
            AcquireError::ConnectError(err)
        } else {
            AcquireError::RequestError(err.to_string())
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AcquireError::MissingUrl
            | AcquireError::InvalidUrlScheme
            | AcquireError::InvalidVideoUrl(_) => ErrorKind::InvalidReference,
            AcquireError::PlaceholderVideo => ErrorKind::PlaceholderReference,
            AcquireError::ClientBuildError(_)
            | AcquireError::Timeout(_)
            | AcquireError::ConnectError(_)
            | AcquireError::RequestError(_)
            | AcquireError::HttpStatus { .. }
            | AcquireError::ServiceError(_)
            | AcquireError::InvalidResponse(_) => ErrorKind::Transport,
            AcquireError::TranscriptNotFound { .. } | AcquireError::EmptyContent(_) => {
                ErrorKind::EmptyResult
            }
            AcquireError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}
