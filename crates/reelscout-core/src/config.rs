use crate::app_config::{
    split_terms, AppConfig, QualityFilterConfig, DEFAULT_SPAM_ALLOW_TERMS, DEFAULT_SPAM_PATTERNS,
};
use crate::ConfigError;

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<i64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    // Blank keys count as missing; the pipeline reports them per call.
    let youtube_api_key = lookup("YOUTUBE_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let youtube_base_url = or_default("YOUTUBE_BASE_URL", DEFAULT_YOUTUBE_BASE_URL);
    let log_level = or_default("REELSCOUT_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("REELSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "REELSCOUT_USER_AGENT",
        "reelscout/0.1 (content-inspiration)",
    );

    let min_view_count = parse_u64("REELSCOUT_MIN_VIEW_COUNT", "10000")?;
    let recent_video_threshold_days = parse_i64("REELSCOUT_RECENT_VIDEO_DAYS", "7")?;
    if recent_video_threshold_days < 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "REELSCOUT_RECENT_VIDEO_DAYS".to_string(),
            reason: "must not be negative".to_string(),
        });
    }
    let spam_patterns = split_terms(&or_default("REELSCOUT_SPAM_PATTERNS", DEFAULT_SPAM_PATTERNS));
    let spam_allow_terms = split_terms(&or_default(
        "REELSCOUT_SPAM_ALLOW_TERMS",
        DEFAULT_SPAM_ALLOW_TERMS,
    ));
    let enrich_channels = parse_bool(
        "REELSCOUT_ENRICH_CHANNELS",
        &or_default("REELSCOUT_ENRICH_CHANNELS", "false"),
    )?;

    Ok(AppConfig {
        youtube_api_key,
        youtube_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        quality: QualityFilterConfig {
            min_view_count,
            recent_video_threshold_days,
            spam_patterns,
            spam_allow_terms,
        },
        enrich_channels,
    })
}

/// Parse a boolean flag. Accepts `true`/`false`, `1`/`0`, `yes`/`no`.
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
