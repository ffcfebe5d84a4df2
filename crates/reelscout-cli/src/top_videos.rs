//! `top-videos` command: builds a request, runs the pipeline, prints the response.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use reelscout_core::{AppConfig, InspirationRequest, InspirationResponse};
use reelscout_ranking::{Pipeline, PipelineSettings};
use reelscout_youtube::YoutubeClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Args)]
pub(crate) struct TopVideosArgs {
    /// Read the request from a JSON file instead of the flags below
    #[arg(
        long,
        conflicts_with_all = [
            "business_name",
            "domain",
            "keywords",
            "language",
            "location",
            "window_days",
        ]
    )]
    pub(crate) request: Option<PathBuf>,

    #[arg(long)]
    pub(crate) business_name: Option<String>,

    /// Business domain, e.g. "fitness"
    #[arg(long)]
    pub(crate) domain: Option<String>,

    /// Search keyword; repeatable, only the first seeds the query
    #[arg(long = "keyword")]
    pub(crate) keywords: Vec<String>,

    /// ISO-639-1 language code
    #[arg(long)]
    pub(crate) language: Option<String>,

    /// Region code, e.g. "US"
    #[arg(long)]
    pub(crate) location: Option<String>,

    /// Trailing window in days (default 30)
    #[arg(long)]
    pub(crate) window_days: Option<u32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub(crate) format: OutputFormat,
}

/// Runs one pipeline pass and prints the response.
///
/// `error` and `no_candidates` responses are printed like any other; only
/// request loading, client construction, and output can fail.
///
/// # Errors
///
/// Returns an error if the request file cannot be read or parsed, the HTTP
/// client cannot be built, or the response cannot be serialized.
pub(crate) async fn run(config: &AppConfig, args: &TopVideosArgs) -> anyhow::Result<()> {
    let request = build_request(args)?;

    let client = YoutubeClient::with_base_url(
        config.youtube_api_key.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
        &config.youtube_base_url,
    )
    .context("failed to build YouTube client")?;
    let pipeline = Pipeline::new(client, PipelineSettings::from_app_config(config));

    let response = pipeline.top_videos(&request).await;
    println!("{}", render(&response, args.format)?);
    Ok(())
}

pub(crate) fn build_request(args: &TopVideosArgs) -> anyhow::Result<InspirationRequest> {
    if let Some(path) = &args.request {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path.display()))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("invalid request JSON in {}", path.display()));
    }

    Ok(InspirationRequest {
        business_name: args.business_name.clone(),
        domain: args.domain.clone(),
        target_audience: None,
        location: args.location.clone(),
        language: args.language.clone(),
        keywords: args.keywords.clone(),
        window_days: args.window_days,
    })
}

pub(crate) fn render(
    response: &InspirationResponse,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(response).context("failed to serialize response")
        }
        OutputFormat::Text => Ok(render_text(response)),
    }
}

fn render_text(response: &InspirationResponse) -> String {
    let mut out = format!(
        "status: {:?} | window: {} days | candidates: {}\n",
        response.status, response.window_days, response.total_candidates
    );
    if let Some(message) = &response.message {
        let _ = writeln!(out, "message: {message}");
    }
    for (i, video) in response.results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. [{:.3}] {} ({})\n    {}",
            i + 1,
            video.score.unwrap_or_default(),
            video.title,
            video.channel_title,
            video.canonical_url
        );
    }
    out.trim_end().to_string()
}
