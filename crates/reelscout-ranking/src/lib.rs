//! Retrieval, quality filtering, and ranking of inspiration candidates.
//!
//! The [`Pipeline`] asks a [`reelscout_core::CandidateSource`] for a bounded
//! page of candidates, drops spam and low-signal videos with the
//! [`QualityFilter`], ranks the survivors with the scoring engine, and
//! always answers with a well-typed [`reelscout_core::InspirationResponse`].

pub mod error;
pub mod filter;
pub mod pipeline;
pub mod scorer;
pub mod signals;

pub use error::PipelineError;
pub use filter::{QualityFilter, Rejection};
pub use pipeline::{build_query, Pipeline, PipelineSettings, SEARCH_MAX_RESULTS, TOP_N};
pub use scorer::{rank, score_candidates, ScoredCandidate};
