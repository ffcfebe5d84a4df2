/// Default title substrings treated as spam by the quality filter.
pub const DEFAULT_SPAM_PATTERNS: &str =
    "free money,crypto pump,giveaway,click here,subscribe for,100% guaranteed";

/// Default allow-list terms: a spam pattern containing one of these is
/// tolerated when the request domain mentions the same term.
pub const DEFAULT_SPAM_ALLOW_TERMS: &str = "crypto,giveaway";

/// Admission thresholds for the quality filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityFilterConfig {
    pub min_view_count: u64,
    pub recent_video_threshold_days: i64,
    /// Lower-cased, trimmed, non-empty.
    pub spam_patterns: Vec<String>,
    /// Lower-cased, trimmed, non-empty.
    pub spam_allow_terms: Vec<String>,
}

impl Default for QualityFilterConfig {
    fn default() -> Self {
        Self {
            min_view_count: 10_000,
            recent_video_threshold_days: 7,
            spam_patterns: split_terms(DEFAULT_SPAM_PATTERNS),
            spam_allow_terms: split_terms(DEFAULT_SPAM_ALLOW_TERMS),
        }
    }
}

/// Splits a comma-separated list into lower-cased, trimmed, non-empty terms.
#[must_use]
pub fn split_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[derive(Clone)]
pub struct AppConfig {
    pub youtube_api_key: Option<String>,
    pub youtube_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub quality: QualityFilterConfig,
    pub enrich_channels: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("youtube_base_url", &self.youtube_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("quality", &self.quality)
            .field("enrich_channels", &self.enrich_channels)
            .finish()
    }
}
