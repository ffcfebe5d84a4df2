//! Admission rules that drop spam and low-signal candidates before scoring.
//!
//! Each candidate is judged on its own; no rule looks at the rest of the
//! set, so applying the filter twice keeps the same survivors.

use std::fmt;

use chrono::{DateTime, Utc};
use reelscout_core::{CandidateVideo, QualityFilterConfig};

use crate::signals::{age_days, engagement_rate};

/// Engagement a below-floor video needs to be admitted while still recent.
pub const RECENT_MIN_ENGAGEMENT: f64 = 0.01;

/// Older than this with fewer than [`STALE_MIN_LIKES`] likes counts as stale.
pub const STALE_AGE_DAYS: i64 = 14;
pub const STALE_MIN_LIKES: u64 = 10;

/// Why a candidate was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    BelowViewFloor,
    StaleLowEngagement,
    SpamTitle { pattern: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::BelowViewFloor => write!(f, "below view floor"),
            Rejection::StaleLowEngagement => write!(f, "stale with low engagement"),
            Rejection::SpamTitle { pattern } => write!(f, "spam title pattern '{pattern}'"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QualityFilter {
    config: QualityFilterConfig,
}

impl QualityFilter {
    /// Spam patterns and allow-list terms are lower-cased and trimmed here,
    /// so callers may pass them in any case.
    #[must_use]
    pub fn new(mut config: QualityFilterConfig) -> Self {
        let clean = |terms: Vec<String>| -> Vec<String> {
            terms
                .into_iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect()
        };
        config.spam_patterns = clean(config.spam_patterns);
        config.spam_allow_terms = clean(config.spam_allow_terms);
        Self { config }
    }

    #[must_use]
    pub fn admits(&self, video: &CandidateVideo, domain: Option<&str>, now: DateTime<Utc>) -> bool {
        self.rejection(video, domain, now).is_none()
    }

    /// Evaluates the rules in order and returns the first one that fails.
    #[must_use]
    pub fn rejection(
        &self,
        video: &CandidateVideo,
        domain: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<Rejection> {
        let age = age_days(video.published_at, now);

        if video.view_count < self.config.min_view_count {
            let recent = age <= self.config.recent_video_threshold_days;
            if !recent || engagement_rate(video) < RECENT_MIN_ENGAGEMENT {
                return Some(Rejection::BelowViewFloor);
            }
        }

        if video.view_count > 0 && video.like_count < STALE_MIN_LIKES && age > STALE_AGE_DAYS {
            return Some(Rejection::StaleLowEngagement);
        }

        self.matched_spam_pattern(&video.title, domain)
            .map(|pattern| Rejection::SpamTitle {
                pattern: pattern.to_string(),
            })
    }

    /// Keeps admitted candidates in their original order.
    #[must_use]
    pub fn apply(
        &self,
        videos: Vec<CandidateVideo>,
        domain: Option<&str>,
        now: DateTime<Utc>,
    ) -> Vec<CandidateVideo> {
        let before = videos.len();
        let kept: Vec<CandidateVideo> = videos
            .into_iter()
            .filter(|video| match self.rejection(video, domain, now) {
                None => true,
                Some(reason) => {
                    tracing::debug!(video_id = %video.id, reason = %reason, "candidate rejected");
                    false
                }
            })
            .collect();

        tracing::info!(before, after = kept.len(), "quality filter applied");
        kept
    }

    /// Returns the first spam pattern found in `title`, skipping patterns the
    /// request domain legitimizes.
    fn matched_spam_pattern(&self, title: &str, domain: Option<&str>) -> Option<&str> {
        let title = title.to_lowercase();
        let domain = domain.map(str::to_lowercase).unwrap_or_default();

        self.config
            .spam_patterns
            .iter()
            .filter(|pattern| title.contains(pattern.as_str()))
            .find(|pattern| !self.domain_allows(pattern, &domain))
            .map(String::as_str)
    }

    /// An allow-list term excuses a pattern only when it appears in both the
    /// pattern and the (lower-cased) domain.
    fn domain_allows(&self, pattern: &str, domain: &str) -> bool {
        !domain.is_empty()
            && self
                .config
                .spam_allow_terms
                .iter()
                .any(|term| pattern.contains(term.as_str()) && domain.contains(term.as_str()))
    }
}
