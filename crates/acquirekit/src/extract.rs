//! YouTube video id extraction
//!
//! Recognizes `v=ID`, `.../be/ID` and `watch?v=ID` anywhere in the reference.
//! The id runs until the next `&` or `?`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Video id that automated callers tend to echo when no real URL was given
pub const PLACEHOLDER_VIDEO_ID: &str = "dQw4w9WgXcQ";

static VIDEO_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:v=|be/)([^&?]+)").expect("video id pattern compiles"));

/// Canonical YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the well-known example id
    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_VIDEO_ID
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the video id from a reference
///
/// Returns `None` for an absent or empty reference, or one that carries
/// none of the recognized shapes. `watch?v=ID` is covered by the `v=` arm.
pub fn extract_video_id(reference: Option<&str>) -> Option<VideoId> {
    let reference = reference?;
    if reference.is_empty() {
        return None;
    }

    VIDEO_ID_RE
        .captures(reference)
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
}
