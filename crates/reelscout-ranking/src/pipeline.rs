//! Inspiration pipeline orchestration.

use std::collections::HashSet;
use std::time::Instant;

use chrono::{DateTime, TimeDelta, Utc};
use reelscout_core::{
    AppConfig, CandidateSource, CandidateVideo, InspirationRequest, InspirationResponse,
    QualityFilterConfig, SearchQuery,
};

use crate::error::PipelineError;
use crate::filter::QualityFilter;
use crate::scorer::rank;

/// Page size requested from the catalog search.
pub const SEARCH_MAX_RESULTS: u32 = 25;

/// Maximum number of results in a response.
pub const TOP_N: usize = 10;

/// Query text used when a request carries neither a domain nor keywords.
const FALLBACK_QUERY: &str = "business";

const CORRELATION_ID_LEN: usize = 8;

/// Everything the pipeline needs besides its source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSettings {
    pub quality: QualityFilterConfig,
    /// Look up channel subscriber counts before scoring.
    pub enrich_channels: bool,
}

impl PipelineSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            quality: config.quality.clone(),
            enrich_channels: config.enrich_channels,
        }
    }
}

/// Builds the search text from the request's domain and first keyword.
///
/// Blank parts are skipped; with nothing left the query is `"business"`.
#[must_use]
pub fn build_query(request: &InspirationRequest) -> String {
    let parts: Vec<&str> = [request.domain.as_deref(), request.keywords.first().map(String::as_str)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        FALLBACK_QUERY.to_string()
    } else {
        parts.join(" ")
    }
}

/// Retrieves, filters, and ranks candidates from one [`CandidateSource`].
#[derive(Debug)]
pub struct Pipeline<S> {
    source: S,
    filter: QualityFilter,
    enrich_channels: bool,
}

impl<S: CandidateSource> Pipeline<S> {
    #[must_use]
    pub fn new(source: S, settings: PipelineSettings) -> Self {
        Self {
            source,
            filter: QualityFilter::new(settings.quality),
            enrich_channels: settings.enrich_channels,
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs the pipeline for `request` as of the current time.
    pub async fn top_videos(&self, request: &InspirationRequest) -> InspirationResponse {
        self.top_videos_at(request, Utc::now()).await
    }

    /// Runs the pipeline for `request` as of `now`.
    ///
    /// Never fails: configuration and upstream failures come back as a
    /// response with `status = error`, an empty result list, and the
    /// effective window echoed.
    pub async fn top_videos_at(
        &self,
        request: &InspirationRequest,
        now: DateTime<Utc>,
    ) -> InspirationResponse {
        let correlation_id = new_correlation_id();
        let window_days = request.effective_window_days();
        let started = Instant::now();

        tracing::info!(
            correlation_id = %correlation_id,
            domain = request.domain.as_deref().unwrap_or(""),
            keywords = request.keywords.len(),
            window_days,
            "inspiration run started"
        );

        match self.run(request, window_days, now, &correlation_id).await {
            Ok(response) => {
                tracing::info!(
                    correlation_id = %correlation_id,
                    status = ?response.status,
                    total_candidates = response.total_candidates,
                    results = response.results.len(),
                    elapsed_ms = elapsed_ms(started),
                    "inspiration run finished"
                );
                response
            }
            Err(e) => {
                tracing::error!(
                    correlation_id = %correlation_id,
                    error = %e,
                    elapsed_ms = elapsed_ms(started),
                    "inspiration run failed"
                );
                InspirationResponse::errored(window_days, e.to_string())
            }
        }
    }

    async fn run(
        &self,
        request: &InspirationRequest,
        window_days: u32,
        now: DateTime<Utc>,
        correlation_id: &str,
    ) -> Result<InspirationResponse, PipelineError> {
        if !self.source.is_configured() {
            return Err(PipelineError::Configuration(
                "YouTube API key not configured".to_string(),
            ));
        }

        let query = SearchQuery {
            query: build_query(request),
            published_after: now
                .checked_sub_signed(TimeDelta::days(i64::from(window_days)))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            language: request.language.clone(),
            region_code: request.location.clone(),
            max_results: SEARCH_MAX_RESULTS,
        };
        tracing::info!(correlation_id, query = %query.query, "searching catalog");

        let ids = self
            .source
            .search(&query)
            .await
            .map_err(|e| PipelineError::upstream("search", e))?;

        if ids.is_empty() {
            tracing::info!(correlation_id, "search returned no candidates");
            return Ok(InspirationResponse::no_candidates(window_days));
        }
        let total_candidates = ids.len();

        let mut candidates = self
            .source
            .fetch_details(&ids)
            .await
            .map_err(|e| PipelineError::upstream("fetch_details", e))?;
        tracing::info!(
            correlation_id,
            ids = total_candidates,
            fetched = candidates.len(),
            "candidate details fetched"
        );

        if self.enrich_channels {
            self.enrich(&mut candidates, correlation_id).await;
        }

        let admitted = self.filter.apply(candidates, request.domain.as_deref(), now);
        let results: Vec<CandidateVideo> = rank(admitted, now)
            .into_iter()
            .filter(|candidate| {
                let valid = candidate.has_valid_url();
                if !valid {
                    tracing::warn!(
                        correlation_id,
                        video_id = %candidate.id,
                        "dropping candidate without a valid url"
                    );
                }
                valid
            })
            .take(TOP_N)
            .collect();

        Ok(InspirationResponse::ok(window_days, total_candidates, results))
    }

    /// Merges subscriber counts into `candidates`. Failures leave the counts
    /// at zero.
    async fn enrich(&self, candidates: &mut [CandidateVideo], correlation_id: &str) {
        let mut seen = HashSet::new();
        let channel_ids: Vec<String> = candidates
            .iter()
            .filter_map(|c| c.channel_id.clone())
            .filter(|id| seen.insert(id.clone()))
            .collect();

        if channel_ids.is_empty() {
            return;
        }

        match self.source.fetch_channel_subscribers(&channel_ids).await {
            Ok(counts) => {
                for candidate in candidates.iter_mut() {
                    if let Some(count) = candidate
                        .channel_id
                        .as_ref()
                        .and_then(|id| counts.get(id))
                    {
                        candidate.subscriber_count = *count;
                    }
                }
                tracing::debug!(
                    correlation_id,
                    channels = channel_ids.len(),
                    with_counts = counts.len(),
                    "channel subscribers merged"
                );
            }
            Err(e) => {
                tracing::warn!(
                    correlation_id,
                    error = %e,
                    "channel enrichment failed, continuing without subscriber counts"
                );
            }
        }
    }
}

fn new_correlation_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(CORRELATION_ID_LEN);
    id
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
