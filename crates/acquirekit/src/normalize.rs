//! Payload normalization
//!
//! Turns raw reader output and transcript payloads into a [`NormalizedResult`].

use crate::types::{
    LanguageTracks, NormalizedResult, TranscriptDocument, TranscriptRecord, TranscriptSegment,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Title: (.*)\n").expect("title pattern compiles"));

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((http[^)]+)\)").expect("link pattern compiles"));

/// Extract the value of the first `Title: ...` line
pub fn extract_title(text: &str) -> Option<String> {
    TITLE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Remove every parenthesized `(http...)` link, parentheses included
///
/// Surrounding whitespace is left as is.
pub fn clean_urls(text: &str) -> String {
    LINK_RE.replace_all(text, "").into_owned()
}

/// Normalize reader proxy output
///
/// The title stays embedded in the body; it is only surfaced for status
/// messages. The title is read after cleaning.
pub fn normalize_scrape(raw: &str, clean: bool) -> NormalizedResult {
    let body = if clean {
        clean_urls(raw)
    } else {
        raw.to_string()
    };
    NormalizedResult {
        title: extract_title(&body),
        body,
    }
}

/// Pick the first preferred language with a non-empty `auto` track
pub fn select_language<'a, S: AsRef<str>>(
    transcripts: &'a BTreeMap<String, LanguageTracks>,
    preferences: &[S],
) -> Option<(&'a str, &'a [TranscriptSegment])> {
    preferences.iter().find_map(|lang| {
        transcripts
            .get_key_value(lang.as_ref())
            .map(|(code, tracks)| (code.as_str(), tracks.auto_segments()))
            .filter(|(_, segments)| !segments.is_empty())
    })
}

/// Join segment texts with single spaces, in order
pub fn flatten_segments(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reason a transcript payload could not be normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoTranscript {
    /// Language codes the payload did carry
    pub available: Vec<String>,
}

/// Normalize a structured transcript record
pub fn normalize_record<S: AsRef<str>>(
    record: &TranscriptRecord,
    preferences: &[S],
) -> Result<NormalizedResult, NoTranscript> {
    let Some(data) = record.data.as_ref() else {
        return Err(NoTranscript { available: vec![] });
    };

    let (language, segments) =
        select_language(&data.transcripts, preferences).ok_or_else(|| NoTranscript {
            available: data.transcripts.keys().cloned().collect(),
        })?;
    tracing::debug!(language, segments = segments.len(), "Selected transcript language");

    Ok(NormalizedResult {
        title: data.video_info.as_ref().and_then(|v| v.name.clone()),
        body: flatten_segments(segments),
    })
}

/// Normalize loader documents
///
/// The body is every document's content joined by newlines; the title comes
/// from the first document.
pub fn normalize_documents(
    documents: &[TranscriptDocument],
) -> Result<NormalizedResult, NoTranscript> {
    let first = documents
        .first()
        .ok_or(NoTranscript { available: vec![] })?;

    Ok(NormalizedResult {
        title: first.metadata.title.clone(),
        body: documents
            .iter()
            .map(|d| d.page_content.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocumentMetadata, TranscriptData, VideoInfo};

    const DEFAULT_PREFS: &[&str] = &["en", "en_auto"];

    fn tracks(texts: &[&str]) -> LanguageTracks {
        LanguageTracks {
            auto: Some(texts.iter().map(|t| TranscriptSegment::new(*t)).collect()),
        }
    }

    fn record(entries: Vec<(&str, LanguageTracks)>) -> TranscriptRecord {
        TranscriptRecord {
            code: 100000,
            message: "success".to_string(),
            data: Some(TranscriptData {
                video_info: Some(VideoInfo {
                    name: Some("Demo".to_string()),
                }),
                transcripts: entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            }),
        }
    }

    #[test]
    fn test_extract_title() {
        let text = "Title: Scraping Sandbox\n\nURL Source: https://toscrape.com/\n";
        assert_eq!(extract_title(text), Some("Scraping Sandbox".to_string()));
    }

    #[test]
    fn test_extract_title_first_match_only() {
        let text = "Title: First \nTitle: Second\n";
        assert_eq!(extract_title(text), Some("First".to_string()));
    }

    #[test]
    fn test_extract_title_requires_newline() {
        assert_eq!(extract_title("Title: no newline"), None);
        assert_eq!(extract_title("no title here\n"), None);
    }

    #[test]
    fn test_clean_urls() {
        assert_eq!(clean_urls("See (http://x.com/y) for more"), "See  for more");
        assert_eq!(
            clean_urls("![img](https://a.b/c.png) and [link](https://d.e)"),
            "![img] and [link]"
        );
        assert_eq!(clean_urls("(not a link) stays"), "(not a link) stays");
    }

    #[test]
    fn test_normalize_scrape_keeps_title_in_body() {
        let raw = "Title: Page\n\nRead [more](https://x.y/z).\n";
        let result = normalize_scrape(raw, true);
        assert_eq!(result.title, Some("Page".to_string()));
        assert_eq!(result.body, "Title: Page\n\nRead [more].\n");

        let result = normalize_scrape(raw, false);
        assert_eq!(result.body, raw);
    }

    #[test]
    fn test_flatten_in_order() {
        let record = record(vec![("en", tracks(&["a", "b"]))]);
        let result = normalize_record(&record, DEFAULT_PREFS).unwrap();
        assert_eq!(result.body, "a b");
        assert_eq!(result.title, Some("Demo".to_string()));
    }

    #[test]
    fn test_flatten_keeps_whitespace_and_duplicates() {
        let segments = vec![
            TranscriptSegment::new(" hi "),
            TranscriptSegment::new(" hi "),
        ];
        assert_eq!(flatten_segments(&segments), " hi   hi ");
    }

    #[test]
    fn test_language_fallback() {
        let record = record(vec![("en_auto", tracks(&["auto", "text"]))]);
        let result = normalize_record(&record, DEFAULT_PREFS).unwrap();
        assert_eq!(result.body, "auto text");
    }

    #[test]
    fn test_preference_order_wins() {
        let record = record(vec![
            ("en", tracks(&["english"])),
            ("en_auto", tracks(&["generated"])),
        ]);
        let result = normalize_record(&record, &["en_auto", "en"]).unwrap();
        assert_eq!(result.body, "generated");
    }

    #[test]
    fn test_empty_auto_track_is_skipped() {
        let record = record(vec![
            ("en", LanguageTracks { auto: Some(vec![]) }),
            ("en_auto", tracks(&["fallback"])),
        ]);
        let result = normalize_record(&record, DEFAULT_PREFS).unwrap();
        assert_eq!(result.body, "fallback");
    }

    #[test]
    fn test_no_preferred_language() {
        let record = record(vec![("de", tracks(&["hallo"])), ("fr", tracks(&["salut"]))]);
        let err = normalize_record(&record, DEFAULT_PREFS).unwrap_err();
        assert_eq!(err.available, vec!["de", "fr"]);
    }

    #[test]
    fn test_record_without_data() {
        let record = TranscriptRecord {
            code: 100000,
            ..Default::default()
        };
        assert!(normalize_record(&record, DEFAULT_PREFS).is_err());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let record = record(vec![("en", tracks(&["x", "y", "z"]))]);
        assert_eq!(
            normalize_record(&record, DEFAULT_PREFS),
            normalize_record(&record, DEFAULT_PREFS)
        );
        let raw = "Title: T\n(http://a) b";
        assert_eq!(normalize_scrape(raw, true), normalize_scrape(raw, true));
    }

    #[test]
    fn test_normalize_documents() {
        let documents = vec![
            TranscriptDocument {
                page_content: "part one".to_string(),
                metadata: DocumentMetadata {
                    title: Some("Lecture".to_string()),
                    ..Default::default()
                },
            },
            TranscriptDocument {
                page_content: "part two".to_string(),
                metadata: DocumentMetadata {
                    title: Some("Ignored".to_string()),
                    ..Default::default()
                },
            },
        ];
        let result = normalize_documents(&documents).unwrap();
        assert_eq!(result.title, Some("Lecture".to_string()));
        assert_eq!(result.body, "part one\npart two");
    }

    #[test]
    fn test_normalize_no_documents() {
        assert!(normalize_documents(&[]).is_err());
    }
}
