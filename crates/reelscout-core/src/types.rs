use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Trailing window used when a request omits `windowDays` or sends zero.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// A fully-resolved inspiration request handed to the pipeline by the
/// calling layer. The pipeline does no language understanding of its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspirationRequest {
    pub business_name: Option<String>,
    pub domain: Option<String>,
    pub target_audience: Option<String>,
    /// Region hint, e.g. `"IL"` or `"US"`.
    pub location: Option<String>,
    /// ISO-639-1 language code, e.g. `"he"` or `"en"`.
    pub language: Option<String>,
    /// Order matters: only the first keyword seeds the search query.
    pub keywords: Vec<String>,
    pub window_days: Option<u32>,
}

impl InspirationRequest {
    /// The window actually used for `publishedAfter`.
    ///
    /// Absent or zero windows fall back to [`DEFAULT_WINDOW_DAYS`].
    #[must_use]
    pub fn effective_window_days(&self) -> u32 {
        match self.window_days {
            Some(days) if days > 0 => days,
            _ => DEFAULT_WINDOW_DAYS,
        }
    }
}

/// One video as returned by the catalog, enriched with statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateVideo {
    pub id: String,
    pub title: String,
    /// Only used to look up subscriber counts; never part of the response.
    #[serde(skip)]
    pub channel_id: Option<String>,
    pub channel_title: String,
    /// `None` when the upstream timestamp was missing or unparseable.
    pub published_at: Option<DateTime<Utc>>,
    pub canonical_url: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    /// `None` when the upstream duration was missing or unparseable.
    pub duration_seconds: Option<u32>,
    pub subscriber_count: u64,
    pub score: Option<f64>,
}

impl CandidateVideo {
    /// Whether this candidate may appear in a response: it needs an id and an
    /// absolute `https://<host>/watch?v=<id>` canonical URL.
    #[must_use]
    pub fn has_valid_url(&self) -> bool {
        if self.id.is_empty() {
            return false;
        }
        let Ok(url) = Url::parse(&self.canonical_url) else {
            return false;
        };
        url.scheme() == "https"
            && url.host_str().is_some_and(|host| !host.is_empty())
            && url.path().ends_with("/watch")
            && url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .is_some_and(|(_, value)| value == self.id.as_str())
    }
}

/// Terminal state of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Ok,
    /// The search returned no ids. Not an error.
    NoCandidates,
    /// Configuration or upstream failure; results are always empty.
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspirationResponse {
    /// Echo of the effective window.
    pub window_days: u32,
    /// Ids returned by the search, counted before quality filtering.
    pub total_candidates: usize,
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub results: Vec<CandidateVideo>,
}

impl InspirationResponse {
    #[must_use]
    pub fn ok(window_days: u32, total_candidates: usize, results: Vec<CandidateVideo>) -> Self {
        Self {
            window_days,
            total_candidates,
            status: ResponseStatus::Ok,
            message: None,
            results,
        }
    }

    #[must_use]
    pub fn no_candidates(window_days: u32) -> Self {
        Self {
            window_days,
            total_candidates: 0,
            status: ResponseStatus::NoCandidates,
            message: Some("no videos found".to_string()),
            results: Vec::new(),
        }
    }

    #[must_use]
    pub fn errored(window_days: u32, message: impl Into<String>) -> Self {
        Self {
            window_days,
            total_candidates: 0,
            status: ResponseStatus::Error,
            message: Some(message.into()),
            results: Vec::new(),
        }
    }
}
