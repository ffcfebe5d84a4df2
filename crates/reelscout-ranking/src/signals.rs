//! Per-candidate measurements shared by the quality filter and the scorer.

use chrono::{DateTime, Utc};
use reelscout_core::CandidateVideo;

/// Age assumed for candidates whose publish time is unknown.
pub const UNKNOWN_AGE_DAYS: i64 = 30;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days between `published_at` and `now`, floored.
///
/// Future timestamps give negative ages; unknown timestamps give
/// [`UNKNOWN_AGE_DAYS`].
#[must_use]
pub fn age_days(published_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    match published_at {
        Some(ts) => (now - ts).num_seconds().div_euclid(SECONDS_PER_DAY),
        None => UNKNOWN_AGE_DAYS,
    }
}

/// `(likes + 2 × comments) / max(1, views)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_rate(video: &CandidateVideo) -> f64 {
    let weighted = video.like_count as f64 + 2.0 * video.comment_count as f64;
    weighted / video.view_count.max(1) as f64
}
