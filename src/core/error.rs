use thiserror::Error;

/// Centralized error types for the platform adapter
///
/// Every failing operation surfaces one of these variants so callers can tell
/// a bad proxy response from a malformed reference or a dead subprocess.
/// The facade decides how much of this detail to mask for its own callers
/// (`YouTube::download` collapses everything into "no result").
#[derive(Error, Debug)]
pub enum PlatformError {
    /// HTTP transport errors (connect failure, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from the proxy or search service
    #[error("HTTP request failed with status: {0}")]
    Status(reqwest::StatusCode),

    /// Proxy responded 200 but the body carried no download token
    #[error("proxy response did not contain a download token")]
    MissingToken,

    /// Derived video id was empty or too short to be real
    #[error("invalid video id derived from reference: {0:?}")]
    InvalidIdentifier(String),

    /// Slider index past the end of the result list; allowed to surface uncollapsed
    #[error("result index {index} out of range for {count} results")]
    IndexOutOfRange { index: usize, count: usize },

    /// Search returned an empty result list
    #[error("search returned no results")]
    EmptyResults,

    /// Subprocess failures (spawn, non-zero exit, timeout)
    #[error("process error: {0}")]
    Process(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors (yt-dlp dump output)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result with PlatformError
pub type PlatformResult<T> = Result<T, PlatformError>;
