//! Transcript retrieval for Viva.
//!
//! Provides a trait-based interface over caption sources and the
//! plain-text transcript model the quiz pipeline consumes.

mod youtube;

pub use youtube::YoutubeTranscriptSource;

use crate::error::Result;
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single timed caption segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Caption text.
    pub text: String,
    /// Segment start offset in seconds.
    pub start_seconds: f64,
    /// Segment duration in seconds.
    pub duration_seconds: f64,
}

/// An ordered caption transcript for one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video identifier the captions belong to.
    pub video_id: String,
    /// Language code of the caption track.
    pub language: String,
    /// Segments in playback order.
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Concatenate all segments into whitespace-normalized plain text.
    pub fn full_text(&self) -> String {
        let joined = self
            .segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        joined.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Total caption duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.segments
            .last()
            .map(|s| s.start_seconds + s.duration_seconds)
            .unwrap_or(0.0)
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video by ID.
    async fn fetch(&self, video_id: &str) -> Result<Transcript>;
}

/// Extract a video ID from a YouTube URL or bare ID.
pub fn extract_video_id(input: &str) -> Option<String> {
    // Matches various YouTube URL formats and bare video IDs
    let video_id_regex = Regex::new(
        r"(?x)
        (?:
            # Full YouTube URLs
            (?:https?://)?
            (?:www\.)?
            (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)
            ([a-zA-Z0-9_-]{11})
        )
        |
        # Bare video ID (11 characters)
        ^([a-zA-Z0-9_-]{11})$
    ",
    )
    .expect("Invalid regex");

    let caps = video_id_regex.captures(input.trim())?;

    // Try group 1 (URL format) then group 2 (bare ID)
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        // Test various URL formats
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );

        // Test invalid inputs
        assert_eq!(extract_video_id("not-a-video-id"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_full_text_normalizes_whitespace() {
        let transcript = Transcript {
            video_id: "dQw4w9WgXcQ".to_string(),
            language: "en".to_string(),
            segments: vec![
                TranscriptSegment {
                    text: "an object in motion\nstays in motion".to_string(),
                    start_seconds: 0.0,
                    duration_seconds: 3.2,
                },
                TranscriptSegment {
                    text: "  unless acted on by a force ".to_string(),
                    start_seconds: 3.2,
                    duration_seconds: 2.1,
                },
            ],
        };

        assert_eq!(
            transcript.full_text(),
            "an object in motion stays in motion unless acted on by a force"
        );
        assert!((transcript.duration_seconds() - 5.3).abs() < 1e-9);
    }
}
