//! The seam between the ranking pipeline and an external video catalog.
//!
//! Any catalog exposing search-by-text and batch-detail-by-id with statistics
//! and an ISO-8601 style duration can implement [`CandidateSource`]. The
//! production implementation lives in `reelscout-youtube`.

use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Utc};

/// Parameters for one bounded search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub published_after: DateTime<Utc>,
    /// ISO-639-1 code; omitted from the upstream call when `None`.
    pub language: Option<String>,
    /// Region code; omitted from the upstream call when `None`.
    pub region_code: Option<String>,
    pub max_results: u32,
}

/// A video catalog the pipeline can retrieve candidates from.
///
/// Implementations make exactly one upstream attempt per call. Retries, if
/// any, belong to the caller.
pub trait CandidateSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether the source holds a usable credential. Checked before any
    /// network call is attempted.
    fn is_configured(&self) -> bool;

    /// Returns candidate ids in the catalog's own popularity order, capped at
    /// `query.max_results`. An empty result set is `Ok(vec![])`.
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;

    /// Fetches statistics and duration for `ids` in a single batch.
    ///
    /// Ids unknown to the catalog are dropped silently. The output follows
    /// the order of `ids`. An empty `ids` slice returns an empty vec without
    /// calling upstream.
    fn fetch_details(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<Vec<crate::CandidateVideo>, Self::Error>> + Send;

    /// Looks up subscriber counts for `channel_ids` in a single batch.
    ///
    /// Channels that hide their count are absent from the map. Catalogs
    /// without channel statistics can keep the default, which reports none.
    fn fetch_channel_subscribers(
        &self,
        _channel_ids: &[String],
    ) -> impl Future<Output = Result<HashMap<String, u64>, Self::Error>> + Send {
        std::future::ready(Ok(HashMap::new()))
    }
}
