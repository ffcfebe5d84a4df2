//! Relative scoring of admitted candidates.
//!
//! Signals are min-max normalized across the candidate set, so a score only
//! means something next to the other scores from the same run.

use chrono::{DateTime, Utc};
use reelscout_core::CandidateVideo;

use crate::signals::{age_days, engagement_rate};

pub(crate) const VELOCITY_WEIGHT: f64 = 0.55;
pub(crate) const ENGAGEMENT_WEIGHT: f64 = 0.30;
pub(crate) const VIEWS_WEIGHT: f64 = 0.10;
pub(crate) const CHANNEL_WEIGHT: f64 = 0.05;

/// How many ranked candidates are logged with their signals.
const LOGGED_TOP: usize = 5;

/// A candidate with its raw signals and combined score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: CandidateVideo,
    pub velocity: f64,
    pub engagement_rate: f64,
    pub raw_view_count: f64,
    pub channel_boost: f64,
    pub duration_penalty: f64,
    pub final_score: f64,
}

/// Penalty subtracted from the combined score by video length.
///
/// Unknown lengths are not penalized.
#[must_use]
pub fn duration_penalty(duration_seconds: Option<u32>) -> f64 {
    match duration_seconds {
        None | Some(120..=1200) => 0.0,
        Some(0..=59) => 0.05,
        Some(1201..) => 0.1,
        Some(_) => 0.02,
    }
}

/// Scores every candidate against the rest of the set, preserving input order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_candidates(
    candidates: Vec<CandidateVideo>,
    now: DateTime<Utc>,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let age = age_days(candidate.published_at, now).max(1);
            let views = candidate.view_count as f64;
            ScoredCandidate {
                velocity: views / age as f64,
                engagement_rate: engagement_rate(&candidate),
                raw_view_count: views,
                channel_boost: (candidate.subscriber_count as f64 + 10.0).log10(),
                duration_penalty: duration_penalty(candidate.duration_seconds),
                final_score: 0.0,
                candidate,
            }
        })
        .collect();

    if scored.len() == 1 {
        scored[0].final_score = 1.0;
        return scored;
    }

    let velocity = Range::over(scored.iter().map(|s| s.velocity));
    let engagement = Range::over(scored.iter().map(|s| s.engagement_rate));
    let views = Range::over(scored.iter().map(|s| s.raw_view_count));
    let channel = Range::over(scored.iter().map(|s| s.channel_boost));

    for s in &mut scored {
        s.final_score = VELOCITY_WEIGHT * velocity.normalize(s.velocity)
            + ENGAGEMENT_WEIGHT * engagement.normalize(s.engagement_rate)
            + VIEWS_WEIGHT * views.normalize(s.raw_view_count)
            + CHANNEL_WEIGHT * channel.normalize(s.channel_boost)
            - s.duration_penalty;
    }

    scored
}

/// Scores and orders candidates best first, writing each final score into
/// [`CandidateVideo::score`]. Equal scores keep their input order.
#[must_use]
pub fn rank(candidates: Vec<CandidateVideo>, now: DateTime<Utc>) -> Vec<CandidateVideo> {
    let mut scored = score_candidates(candidates, now);
    scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

    for (position, s) in scored.iter().take(LOGGED_TOP).enumerate() {
        tracing::debug!(
            position = position + 1,
            video_id = %s.candidate.id,
            final_score = s.final_score,
            velocity = s.velocity,
            engagement_rate = s.engagement_rate,
            views = s.raw_view_count,
            channel_boost = s.channel_boost,
            duration_penalty = s.duration_penalty,
            "ranked candidate"
        );
    }

    scored
        .into_iter()
        .map(|s| {
            let mut candidate = s.candidate;
            candidate.score = Some(s.final_score);
            candidate
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct Range {
    min: f64,
    max: f64,
}

impl Range {
    fn over(values: impl Iterator<Item = f64>) -> Self {
        values.fold(
            Self {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |r, v| Self {
                min: r.min.min(v),
                max: r.max.max(v),
            },
        )
    }

    /// Flat ranges map every member to 1.0.
    #[allow(clippy::float_cmp)]
    fn normalize(self, value: f64) -> f64 {
        if self.max == self.min {
            1.0
        } else {
            (value - self.min) / (self.max - self.min)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn video(id: &str, views: u64, likes: u64, age: i64) -> CandidateVideo {
        CandidateVideo {
            id: id.to_string(),
            title: format!("Video {id}"),
            channel_id: None,
            channel_title: "Channel".to_string(),
            published_at: Some(now() - Duration::days(age)),
            canonical_url: format!("https://www.youtube.com/watch?v={id}"),
            view_count: views,
            like_count: likes,
            comment_count: 0,
            duration_seconds: Some(300),
            subscriber_count: 0,
            score: None,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn duration_penalty_bands() {
        assert_eq!(duration_penalty(None), 0.0);
        assert_eq!(duration_penalty(Some(0)), 0.05);
        assert_eq!(duration_penalty(Some(59)), 0.05);
        assert_eq!(duration_penalty(Some(60)), 0.02);
        assert_eq!(duration_penalty(Some(119)), 0.02);
        assert_eq!(duration_penalty(Some(120)), 0.0);
        assert_eq!(duration_penalty(Some(1200)), 0.0);
        assert_eq!(duration_penalty(Some(1201)), 0.1);
    }

    #[test]
    fn single_candidate_scores_one() {
        let mut v = video("solo", 10, 0, 3);
        v.duration_seconds = Some(30);
        let scored = score_candidates(vec![v], now());
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].final_score, 1.0);
    }

    #[test]
    fn identical_candidates_score_full_weight_sum() {
        let scored = score_candidates(
            vec![video("a", 1_000, 50, 2), video("b", 1_000, 50, 2)],
            now(),
        );
        for s in &scored {
            assert!(close(s.final_score, 1.0), "got {}", s.final_score);
        }
    }

    #[test]
    fn raw_signals_are_computed() {
        let mut v = video("a", 9_000, 90, 3);
        v.comment_count = 45;
        v.subscriber_count = 990;
        let scored = score_candidates(vec![v, video("b", 10, 0, 1)], now());
        let first = &scored[0];
        assert!(close(first.velocity, 3_000.0));
        assert!(close(first.engagement_rate, 0.02));
        assert!(close(first.raw_view_count, 9_000.0));
        assert!(close(first.channel_boost, 3.0));
        assert_eq!(first.duration_penalty, 0.0);
    }

    #[test]
    fn velocity_uses_at_least_one_day() {
        let scored = score_candidates(vec![video("fresh", 500, 0, 0), video("b", 1, 0, 5)], now());
        assert!(close(scored[0].velocity, 500.0));
    }

    #[test]
    fn best_candidate_gets_full_weights_minus_penalty() {
        let mut best = video("best", 100_000, 5_000, 1);
        best.subscriber_count = 1_000_000;
        best.duration_seconds = Some(1_500);
        let worst = video("worst", 100, 0, 20);
        let scored = score_candidates(vec![worst, best], now());
        assert!(close(scored[0].final_score, 0.0));
        assert!(close(scored[1].final_score, 1.0 - 0.1));
    }

    #[test]
    fn rank_orders_descending_and_sets_score() {
        let ranked = rank(
            vec![
                video("low", 1_000, 10, 10),
                video("high", 900_000, 40_000, 1),
                video("mid", 60_000, 2_000, 3),
            ],
            now(),
        );
        let ids: Vec<&str> = ranked.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
        assert!(ranked.iter().all(|v| v.score.is_some()));
        let scores: Vec<f64> = ranked.iter().filter_map(|v| v.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn rank_keeps_input_order_on_ties() {
        let ranked = rank(
            vec![
                video("first", 5_000, 100, 2),
                video("second", 5_000, 100, 2),
                video("third", 5_000, 100, 2),
            ],
            now(),
        );
        let ids: Vec<&str> = ranked.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn rank_of_empty_set_is_empty() {
        assert!(rank(Vec::new(), now()).is_empty());
    }
}
