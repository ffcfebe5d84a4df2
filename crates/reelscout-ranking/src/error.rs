use thiserror::Error;

/// Failures that end a pipeline run early.
///
/// These never escape [`crate::Pipeline::top_videos`]; they are converted into
/// an `error` response there.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing credential. Not retryable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Non-2xx status or transport failure from the catalog.
    #[error("upstream {operation} failed: {source}")]
    Upstream {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl PipelineError {
    pub(crate) fn upstream<E>(operation: &'static str, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Upstream {
            operation,
            source: Box::new(err),
        }
    }
}
