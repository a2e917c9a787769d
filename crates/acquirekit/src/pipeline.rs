//! Acquisition pipelines
//!
//! Each run emits one progress event, calls its source once, normalizes the
//! payload and finishes with exactly one success or error event. Every
//! failure, panics included, comes back as an [`AcquireError`].

use crate::config::{ScrapeConfig, TranscriptConfig, UserScrapeConfig, UserTranscriptConfig};
use crate::error::AcquireError;
use crate::extract::extract_video_id;
use crate::normalize::{normalize_documents, normalize_record, normalize_scrape};
use crate::sources::{ScrapeHeaders, ScrapeSource, TranscriptQuery, TranscriptSource};
use crate::status::{StatusChannel, StatusReporter};
use crate::types::{Acquired, TranscriptPayload};
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::{debug, warn};

/// Error text for a failed scrape, as returned to the assistant
pub fn scrape_error_message(err: &AcquireError) -> String {
    format!("Error: Failed to scrape web page: {}", err)
}

/// Error text for a failed transcript lookup, as returned to the assistant
pub fn transcript_error_message(err: &AcquireError) -> String {
    format!("Error: {}", err)
}

/// Scrape a web page through `source`
pub async fn run_scrape(
    source: &dyn ScrapeSource,
    config: &ScrapeConfig,
    user: Option<&UserScrapeConfig>,
    url: Option<&str>,
    channel: Option<&dyn StatusChannel>,
) -> Result<Acquired, AcquireError> {
    let reporter = StatusReporter::new(channel);
    let reference = url.unwrap_or_default();
    reporter.progress(format!("Scraping {}", reference)).await;

    match guarded(scrape_steps(source, config, user, url, &reporter)).await {
        Ok(acquired) => {
            let label = acquired.title.as_deref().unwrap_or(&acquired.reference);
            reporter
                .success(format!("Successfully Scraped {}", label))
                .await;
            Ok(acquired)
        }
        Err(err) => {
            warn!(url = reference, error = %err, "Scrape failed");
            reporter.error(scrape_error_message(&err)).await;
            Err(err)
        }
    }
}

async fn scrape_steps(
    source: &dyn ScrapeSource,
    config: &ScrapeConfig,
    user: Option<&UserScrapeConfig>,
    url: Option<&str>,
    reporter: &StatusReporter<'_>,
) -> Result<Acquired, AcquireError> {
    let url = url.filter(|u| !u.is_empty()).ok_or(AcquireError::MissingUrl)?;
    if !has_http_scheme(url) {
        return Err(AcquireError::InvalidUrlScheme);
    }

    let headers = ScrapeHeaders {
        no_cache: config.disable_caching,
        bearer: config.api_key(user),
    };
    debug!(source = source.name(), url, "Using scrape source");
    let raw = source.scrape(url, &headers).await?;

    let clean = config.clean_content(user);
    if clean {
        reporter.progress("Received content, cleaning up ...").await;
    }

    let normalized = normalize_scrape(&raw, clean);
    if normalized.body.trim().is_empty() {
        return Err(AcquireError::EmptyContent(url.to_string()));
    }

    Ok(Acquired {
        reference: url.to_string(),
        title: normalized.title,
        content: normalized.body,
    })
}

/// Schemes compare case-insensitively
fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        url.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Fetch a YouTube transcript through `source`
pub async fn run_transcript(
    source: &dyn TranscriptSource,
    config: &TranscriptConfig,
    user: Option<&UserTranscriptConfig>,
    url: Option<&str>,
    channel: Option<&dyn StatusChannel>,
) -> Result<Acquired, AcquireError> {
    let reporter = StatusReporter::new(channel);
    let reference = url.unwrap_or_default();
    reporter
        .progress(format!("Getting transcript for {}", reference))
        .await;

    match guarded(transcript_steps(source, config, user, url)).await {
        Ok(acquired) => {
            let label = acquired.title.as_deref().unwrap_or(&acquired.reference);
            reporter
                .success(format!("Transcript for {} retrieved!", label))
                .await;
            Ok(acquired)
        }
        Err(err) => {
            warn!(url = reference, error = %err, "Transcript lookup failed");
            reporter.error(transcript_error_message(&err)).await;
            Err(err)
        }
    }
}

async fn transcript_steps(
    source: &dyn TranscriptSource,
    config: &TranscriptConfig,
    user: Option<&UserTranscriptConfig>,
    url: Option<&str>,
) -> Result<Acquired, AcquireError> {
    let reference = url.unwrap_or_default();
    let video_id = extract_video_id(url)
        .ok_or_else(|| AcquireError::InvalidVideoUrl(reference.to_string()))?;
    if video_id.is_placeholder() {
        return Err(AcquireError::PlaceholderVideo);
    }

    let languages = config.languages(user);
    let translate_to = config.translate_to(user);
    let query = TranscriptQuery {
        url: reference,
        video_id: &video_id,
        languages: &languages,
        translate_to: translate_to.as_deref(),
    };
    debug!(source = source.name(), video_id = %video_id, "Using transcript source");
    let payload = source.fetch(&query).await?;

    let normalized = match &payload {
        TranscriptPayload::Record(record) => normalize_record(record, languages.as_slice()),
        TranscriptPayload::Documents(documents) => normalize_documents(documents),
    }
    .map_err(|missing| AcquireError::TranscriptNotFound {
        reference: reference.to_string(),
        available: missing.available,
    })?;

    Ok(Acquired {
        reference: reference.to_string(),
        content: normalized.render_transcript(),
        title: normalized.title,
    })
}

/// Turn a panic inside `fut` into [`AcquireError::Unexpected`]
async fn guarded<F>(fut: F) -> Result<Acquired, AcquireError>
where
    F: Future<Output = Result<Acquired, AcquireError>>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(AcquireError::Unexpected(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
