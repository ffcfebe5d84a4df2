//! `YouTube` Data API v3 response types.
//!
//! Only the fields the pipeline reads are modelled; everything else is
//! ignored. Statistics arrive as decimal strings, so counts are kept as
//! `Option<String>` here and parsed during conversion.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub id: Option<SearchItemId>,
}

/// `id` of a search hit. Only video hits carry `videoId`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    #[serde(default)]
    pub video_id: Option<String>,
}

// ---------------------------------------------------------------------------
// videos
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub snippet: Option<VideoSnippet>,
    #[serde(default)]
    pub statistics: Option<VideoStatistics>,
    #[serde(default)]
    pub content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub channel_title: Option<String>,
    /// RFC 3339 timestamp, e.g. `"2025-03-01T12:00:00Z"`.
    #[serde(default)]
    pub published_at: Option<String>,
}

/// Counts are absent when the uploader hides them (likes, comments).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default)]
    pub view_count: Option<String>,
    #[serde(default)]
    pub like_count: Option<String>,
    #[serde(default)]
    pub comment_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContentDetails {
    /// ISO-8601 duration, e.g. `"PT4M13S"`.
    #[serde(default)]
    pub duration: Option<String>,
}

// ---------------------------------------------------------------------------
// channels
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(default)]
    pub subscriber_count: Option<String>,
    #[serde(default)]
    pub hidden_subscriber_count: bool,
}

// ---------------------------------------------------------------------------
// errors
// ---------------------------------------------------------------------------

/// Body of a non-2xx response: `{ "error": { "code": 403, "message": "..." } }`.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Parses a decimal count string, treating absent or malformed values as 0.
#[must_use]
pub(crate) fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_count_handles_missing_and_malformed() {
        assert_eq!(parse_count(Some("12345")), 12_345);
        assert_eq!(parse_count(Some(" 7 ")), 7);
        assert_eq!(parse_count(Some("")), 0);
        assert_eq!(parse_count(Some("n/a")), 0);
        assert_eq!(parse_count(None), 0);
    }

    #[test]
    fn search_item_without_video_id_deserializes() {
        let body = r#"{"items":[{"id":{"kind":"youtube#channel","channelId":"UC1"}},{"id":{"kind":"youtube#video","videoId":"v1"}}]}"#;
        let parsed: SearchListResponse = serde_json::from_str(body).expect("should parse");
        assert_eq!(parsed.items.len(), 2);
        assert!(parsed.items[0].id.as_ref().unwrap().video_id.is_none());
        assert_eq!(
            parsed.items[1].id.as_ref().unwrap().video_id.as_deref(),
            Some("v1")
        );
    }

    #[test]
    fn video_item_with_hidden_likes_deserializes() {
        let body = r#"{"items":[{"id":"v1","statistics":{"viewCount":"10"},"contentDetails":{"duration":"PT1M"}}]}"#;
        let parsed: VideoListResponse = serde_json::from_str(body).expect("should parse");
        let stats = parsed.items[0].statistics.as_ref().unwrap();
        assert_eq!(stats.view_count.as_deref(), Some("10"));
        assert!(stats.like_count.is_none());
        assert!(parsed.items[0].snippet.is_none());
    }

    #[test]
    fn missing_items_defaults_to_empty() {
        let parsed: VideoListResponse = serde_json::from_str("{}").expect("should parse");
        assert!(parsed.items.is_empty());
    }
}
