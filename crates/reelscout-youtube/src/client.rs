//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with API-key handling, typed response deserialization, and
//! conversion of `videos` items into [`CandidateVideo`]s. Every call is a
//! single attempt; non-2xx statuses surface as [`YoutubeError::Api`].

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reelscout_core::{CandidateVideo, SearchQuery};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::duration::parse_duration_seconds;
use crate::error::YoutubeError;
use crate::types::{
    parse_count, ChannelListResponse, ErrorEnvelope, SearchListResponse, VideoItem,
    VideoListResponse,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Prefix of every canonical watch URL; the video id is appended verbatim.
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Client for the `YouTube` Data API.
///
/// Use [`YoutubeClient::new`] for production or
/// [`YoutubeClient::with_base_url`] to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a client pointed at the production API.
    ///
    /// A missing key is allowed here so the pipeline can report it per call
    /// rather than failing at startup.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`YoutubeError::InvalidBaseUrl`] if `base_url` is not
    /// an absolute http(s) URL.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join("search")` appends a segment
        // instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(YoutubeError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Searches for videos published after `query.published_after`, ordered
    /// by view count.
    ///
    /// Non-video hits are skipped. The result is capped at
    /// `query.max_results`.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] on a non-2xx status.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search_video_ids(&self, query: &SearchQuery) -> Result<Vec<String>, YoutubeError> {
        let max_results = query.max_results.to_string();
        let published_after = query
            .published_after
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut params = vec![
            ("part", "snippet"),
            ("type", "video"),
            ("order", "viewCount"),
            ("maxResults", max_results.as_str()),
            ("q", query.query.as_str()),
            ("publishedAfter", published_after.as_str()),
        ];
        if let Some(lang) = non_blank(query.language.as_deref()) {
            params.push(("relevanceLanguage", lang));
        }
        if let Some(region) = non_blank(query.region_code.as_deref()) {
            params.push(("regionCode", region));
        }

        let url = self.build_url("search", &params)?;
        let body: SearchListResponse = self
            .request_json(&url, &format!("search(q={})", query.query))
            .await?;

        let cap = usize::try_from(query.max_results).unwrap_or(usize::MAX);
        let ids: Vec<String> = body
            .items
            .into_iter()
            .filter_map(|item| item.id.and_then(|id| id.video_id))
            .filter(|id| !id.is_empty())
            .take(cap)
            .collect();

        tracing::debug!(query = %query.query, count = ids.len(), "youtube search returned ids");
        Ok(ids)
    }

    /// Fetches snippet, statistics, and content details for `ids` in one call.
    ///
    /// Items are returned in the order of `ids`; ids the API does not return
    /// are dropped. An empty `ids` slice returns immediately without a
    /// request.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] on a non-2xx status.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn fetch_videos(&self, ids: &[String]) -> Result<Vec<CandidateVideo>, YoutubeError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let url = self.build_url(
            "videos",
            &[
                ("part", "snippet,statistics,contentDetails"),
                ("id", joined.as_str()),
            ],
        )?;
        let body: VideoListResponse = self
            .request_json(&url, &format!("videos(ids={})", ids.len()))
            .await?;

        let mut by_id: HashMap<String, CandidateVideo> = body
            .items
            .into_iter()
            .filter_map(to_candidate)
            .map(|c| (c.id.clone(), c))
            .collect();

        let videos: Vec<CandidateVideo> = ids.iter().filter_map(|id| by_id.remove(id)).collect();

        if videos.len() < ids.len() {
            tracing::debug!(
                requested = ids.len(),
                returned = videos.len(),
                "youtube videos call omitted some ids"
            );
        }
        Ok(videos)
    }

    /// Fetches subscriber counts for `channel_ids` in one call.
    ///
    /// Channels with a hidden or missing count are left out of the map.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] on a non-2xx status.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn fetch_subscriber_counts(
        &self,
        channel_ids: &[String],
    ) -> Result<HashMap<String, u64>, YoutubeError> {
        if channel_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let joined = channel_ids.join(",");
        let url = self.build_url("channels", &[("part", "statistics"), ("id", joined.as_str())])?;
        let body: ChannelListResponse = self
            .request_json(&url, &format!("channels(ids={})", channel_ids.len()))
            .await?;

        Ok(body
            .items
            .into_iter()
            .filter_map(|item| {
                let stats = item.statistics?;
                if stats.hidden_subscriber_count {
                    return None;
                }
                let count = stats.subscriber_count?.trim().parse::<u64>().ok()?;
                Some((item.id, count))
            })
            .collect())
    }

    /// Builds the request URL for `endpoint` with percent-encoded query
    /// parameters. The API key, when present, is appended last.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            if let Some(key) = &self.api_key {
                pairs.append_pair("key", key);
            }
        }
        Ok(url)
    }

    /// Sends a GET request and deserializes a 2xx body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Api`] for non-2xx statuses,
    /// [`YoutubeError::Http`] on network failure, and
    /// [`YoutubeError::Deserialize`] if the body is not the expected JSON.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, YoutubeError> {
        let masked = mask_api_key(url);
        tracing::debug!(url = %masked, "youtube request");

        // Transport errors embed the request URL; strip it so the key never
        // reaches logs or responses.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| YoutubeError::Http(e.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| YoutubeError::Http(e.without_url()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| "unknown error".to_owned());
            tracing::warn!(
                url = %masked,
                status = status.as_u16(),
                message = %message,
                "youtube request failed"
            );
            return Err(YoutubeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Renders `url` with the `key` query parameter replaced by `***`.
#[must_use]
pub fn mask_api_key(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    let mut masked = url.clone();
    masked.set_query(None);
    if !pairs.is_empty() {
        masked.query_pairs_mut().extend_pairs(pairs);
    }
    masked.to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Converts one `videos` item into a candidate. Items without an id are
/// discarded; malformed timestamps and durations become `None`.
fn to_candidate(item: VideoItem) -> Option<CandidateVideo> {
    if item.id.is_empty() {
        return None;
    }

    let (title, channel_id, channel_title, published_raw) = match item.snippet {
        Some(s) => (
            s.title.unwrap_or_default(),
            s.channel_id.filter(|c| !c.is_empty()),
            s.channel_title.unwrap_or_default(),
            s.published_at,
        ),
        None => (String::new(), None, String::new(), None),
    };

    let published_at = published_raw.as_deref().and_then(|raw| {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                tracing::warn!(
                    video_id = %item.id,
                    published_at = raw,
                    error = %e,
                    "unparseable publishedAt"
                );
            })
            .ok()
    });

    let duration_seconds = item
        .content_details
        .and_then(|cd| cd.duration)
        .and_then(|raw| {
            let parsed = parse_duration_seconds(&raw);
            if parsed.is_none() {
                tracing::warn!(video_id = %item.id, duration = %raw, "unparseable duration");
            }
            parsed
        });

    let (view_count, like_count, comment_count) = match &item.statistics {
        Some(s) => (
            parse_count(s.view_count.as_deref()),
            parse_count(s.like_count.as_deref()),
            parse_count(s.comment_count.as_deref()),
        ),
        None => (0, 0, 0),
    };

    let canonical_url = format!("{WATCH_URL_BASE}{}", item.id);

    Some(CandidateVideo {
        id: item.id,
        title,
        channel_id,
        channel_title,
        published_at,
        canonical_url,
        view_count,
        like_count,
        comment_count,
        duration_seconds,
        subscriber_count: 0,
        score: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentDetails, VideoSnippet, VideoStatistics};

    fn test_client(base_url: &str) -> YoutubeClient {
        YoutubeClient::with_base_url(Some("test-key"), 30, "reelscout-test/0.1", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_endpoint_and_key() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client.build_url("videos", &[("id", "a,b")]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/videos?id=a%2Cb&key=test-key"
        );
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("https://www.googleapis.com/youtube/v3/");
        let url = client.build_url("search", &[("q", "fitness")]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/search?q=fitness&key=test-key"
        );
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client.build_url("search", &[("q", "home & gym")]).unwrap();
        assert!(
            url.as_str().contains("home+%26+gym") || url.as_str().contains("home%20%26%20gym"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn build_url_omits_key_when_unconfigured() {
        let client =
            YoutubeClient::with_base_url(None, 30, "reelscout-test/0.1", "https://example.com")
                .unwrap();
        assert!(!client.has_api_key());
        let url = client.build_url("search", &[("q", "x")]).unwrap();
        assert!(!url.as_str().contains("key="), "unexpected key param: {url}");
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let client = YoutubeClient::with_base_url(
            Some("  "),
            30,
            "reelscout-test/0.1",
            "https://example.com",
        )
        .unwrap();
        assert!(!client.has_api_key());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = YoutubeClient::with_base_url(Some("k"), 30, "ua", "not a url");
        assert!(matches!(result, Err(YoutubeError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn mask_api_key_hides_key_value() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client.build_url("search", &[("q", "yoga")]).unwrap();
        let masked = mask_api_key(&url);
        assert!(!masked.contains("test-key"), "key leaked: {masked}");
        assert!(masked.contains("key=***"), "mask missing: {masked}");
        assert!(masked.contains("q=yoga"));
    }

    fn item(id: &str) -> VideoItem {
        VideoItem {
            id: id.to_owned(),
            snippet: Some(VideoSnippet {
                title: Some("Full body stretch".to_owned()),
                channel_id: Some("UC9".to_owned()),
                channel_title: Some("Stretch Lab".to_owned()),
                published_at: Some("2025-03-01T12:00:00Z".to_owned()),
            }),
            statistics: Some(VideoStatistics {
                view_count: Some("1500".to_owned()),
                like_count: None,
                comment_count: Some("12".to_owned()),
            }),
            content_details: Some(ContentDetails {
                duration: Some("PT10M".to_owned()),
            }),
        }
    }

    #[test]
    fn to_candidate_populates_fields_and_url() {
        let c = to_candidate(item("vid1")).expect("candidate");
        assert_eq!(c.canonical_url, "https://www.youtube.com/watch?v=vid1");
        assert_eq!(c.channel_id.as_deref(), Some("UC9"));
        assert_eq!(c.view_count, 1500);
        assert_eq!(c.like_count, 0);
        assert_eq!(c.comment_count, 12);
        assert_eq!(c.duration_seconds, Some(600));
        assert_eq!(
            c.published_at.map(|d| d.to_rfc3339()),
            Some("2025-03-01T12:00:00+00:00".to_owned())
        );
        assert!(c.has_valid_url());
    }

    #[test]
    fn to_candidate_tolerates_malformed_fields() {
        let mut raw = item("vid2");
        if let Some(s) = raw.snippet.as_mut() {
            s.published_at = Some("yesterday".to_owned());
        }
        raw.content_details = Some(ContentDetails {
            duration: Some("P1D".to_owned()),
        });
        let c = to_candidate(raw).expect("candidate");
        assert!(c.published_at.is_none());
        assert!(c.duration_seconds.is_none());
    }

    #[test]
    fn to_candidate_discards_items_without_id() {
        assert!(to_candidate(item("")).is_none());
    }
}
