//! `YouTube` Data API v3 adapter for reelscout.
//!
//! Implements [`reelscout_core::CandidateSource`] on top of the `search`,
//! `videos`, and `channels` endpoints, plus the ISO-8601 duration parsing the
//! `videos` endpoint needs.

pub mod client;
pub mod duration;
pub mod error;
pub mod types;

mod source;

pub use client::{YoutubeClient, WATCH_URL_BASE};
pub use duration::parse_duration_seconds;
pub use error::YoutubeError;
