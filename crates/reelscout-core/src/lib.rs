//! Shared data model, configuration, and the catalog-source seam for reelscout.

pub mod app_config;
pub mod config;
pub mod error;
pub mod source;
pub mod types;

pub use app_config::{AppConfig, QualityFilterConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use source::{CandidateSource, SearchQuery};
pub use types::{
    CandidateVideo, InspirationRequest, InspirationResponse, ResponseStatus, DEFAULT_WINDOW_DAYS,
};
