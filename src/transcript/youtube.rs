//! YouTube caption retrieval.
//!
//! Fetches the watch page, locates the caption track list in the embedded
//! player response, and downloads the selected track in `json3` format.

use super::{Transcript, TranscriptSegment, TranscriptSource};
use crate::error::{Result, VivaError};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Timeout for caption requests.
const FETCH_TIMEOUT_SECS: u64 = 30;

/// Browser-like user agent; YouTube serves a reduced page to unknown clients.
const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36";

/// A caption track entry from the player response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

/// Transcript source backed by YouTube's caption endpoints.
pub struct YoutubeTranscriptSource {
    client: reqwest::Client,
    language: String,
}

impl YoutubeTranscriptSource {
    /// Create a source preferring the given caption language.
    pub fn new(language: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                VivaError::TranscriptUnavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            language: language.to_string(),
        })
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<Transcript> {
        let watch_url = format!("https://www.youtube.com/watch?v={}", video_id);

        let page = self
            .client
            .get(&watch_url)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                VivaError::TranscriptUnavailable(format!("Failed to reach YouTube: {}", e))
            })?
            .error_for_status()
            .map_err(|e| {
                VivaError::TranscriptUnavailable(format!(
                    "YouTube returned an error for {}: {}",
                    video_id, e
                ))
            })?
            .text()
            .await
            .map_err(|e| {
                VivaError::TranscriptUnavailable(format!("Failed to read watch page: {}", e))
            })?;

        if page.contains(r#""status":"ERROR""#) {
            return Err(VivaError::TranscriptUnavailable(format!(
                "Video {} is private, removed, or does not exist",
                video_id
            )));
        }

        let tracks = extract_caption_tracks(&page).ok_or_else(|| {
            VivaError::TranscriptUnavailable(format!(
                "Captions are disabled for video {}",
                video_id
            ))
        })?;

        let track = select_track(&tracks, &self.language).ok_or_else(|| {
            VivaError::TranscriptUnavailable(format!(
                "No caption track available for video {}",
                video_id
            ))
        })?;

        debug!(
            "Fetching caption track ({}, kind: {:?})",
            track.language_code, track.kind
        );

        let timedtext_url = format!("{}&fmt=json3", track.base_url);

        let body = self
            .client
            .get(&timedtext_url)
            .send()
            .await
            .map_err(|e| {
                VivaError::TranscriptUnavailable(format!("Failed to fetch captions: {}", e))
            })?
            .error_for_status()
            .map_err(|e| {
                VivaError::TranscriptUnavailable(format!("Caption endpoint error: {}", e))
            })?
            .text()
            .await
            .map_err(|e| {
                VivaError::TranscriptUnavailable(format!("Failed to read captions: {}", e))
            })?;

        let segments = parse_json3(&body)?;

        if segments.is_empty() {
            return Err(VivaError::TranscriptUnavailable(format!(
                "Caption track for video {} is empty",
                video_id
            )));
        }

        Ok(Transcript {
            video_id: video_id.to_string(),
            language: track.language_code.clone(),
            segments,
        })
    }
}

/// Locate and parse the `captionTracks` array embedded in the watch page.
fn extract_caption_tracks(page: &str) -> Option<Vec<CaptionTrack>> {
    let marker = r#""captionTracks":"#;
    let start = page.find(marker)? + marker.len();
    let rest = &page[start..];

    if !rest.starts_with('[') {
        return None;
    }

    // Scan for the matching close bracket; track entries contain no
    // nested arrays, but string values may contain brackets.
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut end = None;

    for (i, c) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    end = Some(i + 1);
                    break;
                }
            }
            _ => {}
        }
    }

    let tracks: Vec<CaptionTrack> = serde_json::from_str(&rest[..end?]).ok()?;
    if tracks.is_empty() {
        None
    } else {
        Some(tracks)
    }
}

/// Pick the preferred language track, falling back to a prefix match
/// (e.g. "en" matches "en-US"), then to the first available track.
fn select_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.language_code == language)
        .or_else(|| {
            tracks
                .iter()
                .find(|t| t.language_code.starts_with(language))
        })
        .or_else(|| tracks.first())
}

/// Parse the timedtext `json3` payload into ordered segments.
fn parse_json3(body: &str) -> Result<Vec<TranscriptSegment>> {
    let json: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        VivaError::TranscriptUnavailable(format!("Failed to parse caption payload: {}", e))
    })?;

    let events = json["events"].as_array().ok_or_else(|| {
        VivaError::TranscriptUnavailable("Caption payload has no events".to_string())
    })?;

    let mut segments = Vec::new();

    for event in events {
        let Some(segs) = event["segs"].as_array() else {
            continue;
        };

        let text: String = segs
            .iter()
            .filter_map(|s| s["utf8"].as_str())
            .collect::<Vec<_>>()
            .join("")
            .replace('\n', " ")
            .trim()
            .to_string();

        if text.is_empty() {
            continue;
        }

        let start_ms = event["tStartMs"].as_f64().unwrap_or(0.0);
        let duration_ms = event["dDurationMs"].as_f64().unwrap_or(0.0);

        segments.push(TranscriptSegment {
            text,
            start_seconds: start_ms / 1000.0,
            duration_seconds: duration_ms / 1000.0,
        });
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r#"var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=dQw4w9WgXcQ\u0026lang=en","name":{"simpleText":"English"},"vssId":".en","languageCode":"en","isTranslatable":true},{"baseUrl":"https://www.youtube.com/api/timedtext?v=dQw4w9WgXcQ\u0026lang=de","name":{"simpleText":"German"},"vssId":".de","languageCode":"de","kind":"asr","isTranslatable":true}]}},"videoDetails":{}}"#;

    #[test]
    fn test_extract_caption_tracks() {
        let tracks = extract_caption_tracks(SAMPLE_PAGE).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language_code, "en");
        // serde_json unescapes & to a literal ampersand
        assert!(tracks[0].base_url.contains("&lang=en"));
        assert_eq!(tracks[1].kind.as_deref(), Some("asr"));
    }

    #[test]
    fn test_extract_caption_tracks_missing() {
        assert!(extract_caption_tracks("<html>no captions here</html>").is_none());
        assert!(extract_caption_tracks(r#""captionTracks":[]"#).is_none());
    }

    #[test]
    fn test_select_track_prefers_language() {
        let tracks = extract_caption_tracks(SAMPLE_PAGE).unwrap();

        assert_eq!(select_track(&tracks, "de").unwrap().language_code, "de");
        assert_eq!(select_track(&tracks, "en").unwrap().language_code, "en");
        // No match falls back to the first track
        assert_eq!(select_track(&tracks, "fr").unwrap().language_code, "en");
    }

    #[test]
    fn test_select_track_prefix_match() {
        let tracks: Vec<CaptionTrack> = serde_json::from_str(
            r#"[{"baseUrl":"u1","languageCode":"en-US"},{"baseUrl":"u2","languageCode":"nb"}]"#,
        )
        .unwrap();
        assert_eq!(select_track(&tracks, "en").unwrap().language_code, "en-US");
    }

    #[test]
    fn test_parse_json3() {
        let body = r#"{
            "events": [
                {"tStartMs": 0, "dDurationMs": 1000},
                {"tStartMs": 1200, "dDurationMs": 3200, "segs": [{"utf8": "Newton's first law"}, {"utf8": " states that"}]},
                {"tStartMs": 4400, "dDurationMs": 2800, "segs": [{"utf8": "an object in motion\nstays in motion"}]},
                {"tStartMs": 7200, "dDurationMs": 500, "segs": [{"utf8": "\n"}]}
            ]
        }"#;

        let segments = parse_json3(body).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "Newton's first law states that");
        assert!((segments[0].start_seconds - 1.2).abs() < 1e-9);
        assert_eq!(segments[1].text, "an object in motion stays in motion");
    }

    #[test]
    fn test_parse_json3_invalid() {
        assert!(parse_json3("not json").is_err());
        assert!(parse_json3(r#"{"no_events": true}"#).is_err());
    }
}
