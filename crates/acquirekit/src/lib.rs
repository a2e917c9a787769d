//! AcquireKit - content acquisition tools for LLM agents
//!
//! This crate turns a URL into clean, LLM-ready text. Two tools are provided:
//!
//! - [`ScrapeTool`] - fetches a web page through a reader proxy and returns
//!   readable text, optionally with embedded links removed
//! - [`TranscriptTool`] - fetches the transcript of a YouTube video and
//!   returns it under a `Title:` / `Transcript:` header
//!
//! ## Sources
//!
//! Remote services sit behind the [`ScrapeSource`] and [`TranscriptSource`]
//! traits, so the pipelines can be driven by the built-in HTTP sources or by
//! anything else that produces the same payloads:
//!
//! - [`ReaderSource`] - reader proxy (`https://r.jina.ai/{url}`)
//! - [`TranscriptApiSource`] - structured transcript API keyed by video id
//! - [`TranscriptLoaderSource`] - loader service returning documents
//!
//! ## Status events
//!
//! Both pipelines report progress over an optional [`StatusChannel`]. Each run
//! emits in-progress events followed by exactly one terminal event.

pub mod client;
pub mod config;
mod error;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod sources;
pub mod status;
mod tool;
mod types;

pub use client::{scrape, youtube_transcript};
pub use config::{ScrapeConfig, TranscriptConfig, UserScrapeConfig, UserTranscriptConfig};
pub use error::{AcquireError, ErrorKind};
pub use extract::{extract_video_id, VideoId};
pub use pipeline::{run_scrape, run_transcript};
pub use sources::{
    ReaderSource, ScrapeHeaders, ScrapeSource, TranscriptApiSource, TranscriptLoaderSource,
    TranscriptQuery, TranscriptSource,
};
pub use status::{
    CollectingChannel, FnChannel, NoopChannel, Status, StatusChannel, StatusEvent, StatusReporter,
};
pub use tool::{
    ScrapeTool, ScrapeToolBuilder, TranscriptTool, TranscriptToolBuilder, SCRAPE_TOOL_NAME,
    TRANSCRIPT_TOOL_NAME,
};
pub use types::{
    Acquired, DocumentMetadata, LanguageTracks, NormalizedResult, ScrapeRequest,
    TranscriptData, TranscriptDocument, TranscriptPayload, TranscriptRecord, TranscriptRequest,
    TranscriptSegment, VideoInfo,
};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "AcquireKit/1.0";

/// Scrape tool description for LLM consumption
pub const SCRAPE_TOOL_DESCRIPTION: &str = r#"Scrapes a web page and returns its readable text.

- Pages are fetched through a reader proxy
- Embedded link targets are removed by default
- Returns an "Error: ..." string on failure"#;

/// Transcript tool description for LLM consumption
pub const TRANSCRIPT_TOOL_DESCRIPTION: &str = r#"Fetches the transcript of a YouTube video.

- Accepts watch URLs (v=ID) and short links (youtu.be/ID)
- Prefers English, falling back to auto-generated English
- Returns an "Error: ..." string on failure"#;

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# AcquireKit Tools

Turns URLs into clean text for language models.

## web_scrape

Scrapes a web page through a reader proxy.

### Input Parameters
- `url` (required): The page URL (must be http:// or https://)

### Output
The page text. The first line is usually `Title: ...`. Link targets such as
`(https://...)` are removed unless cleanup is disabled.

### Example
```json
{"url": "https://toscrape.com/"}
```

## youtube_transcript

Fetches the transcript of a YouTube video.

### Input Parameters
- `url` (required): A YouTube URL, e.g. `https://www.youtube.com/watch?v=ID`
  or `https://youtu.be/ID`

### Output
```text
Title: <video title>

Transcript:
<transcript text>
```

### Example
```json
{"url": "https://www.youtube.com/watch?v=zhWDdy_5v2w"}
```

## Error Handling
Both tools return a single string starting with `Error:` when something goes
wrong:
- Missing or malformed URL
- Upstream service failure or non-success status
- No transcript in any preferred language (available languages are listed)
"#;
