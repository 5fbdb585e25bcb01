use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration constants for the adapter

/// Cached yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| {
    env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string())
});

/// Download folder path
/// Read from DOWNLOAD_FOLDER environment variable, defaults to "downloads"
/// (relative to the working directory). Supports tilde (~) expansion.
pub static DOWNLOAD_FOLDER: Lazy<String> = Lazy::new(|| {
    env::var("DOWNLOAD_FOLDER").unwrap_or_else(|_| "downloads".to_string())
});

/// Explicit download-proxy base URL
/// When TUBEFETCH_API_URL is set, remote address discovery is skipped entirely
/// and this value is used as-is.
pub static API_URL_OVERRIDE: Lazy<Option<String>> = Lazy::new(|| {
    env::var("TUBEFETCH_API_URL").ok().filter(|v| !v.is_empty())
});

/// Search-service base URL
/// Read from SEARCH_API_URL; defaults to the proxy fallback host, which also
/// serves the search endpoint.
pub static SEARCH_API_URL: Lazy<String> = Lazy::new(|| {
    env::var("SEARCH_API_URL").unwrap_or_else(|_| api::FALLBACK_URL.to_string())
});

/// Resolved download folder with tilde expansion applied
pub fn download_folder() -> PathBuf {
    PathBuf::from(shellexpand::tilde(&*DOWNLOAD_FOLDER).into_owned())
}

/// Download-proxy configuration
pub mod api {
    use super::Duration;

    /// Plaintext paste holding the current proxy base URL
    pub const ENDPOINT_SOURCE_URL: &str = "https://pastebin.com/raw/rLsBhAQa";

    /// Hardcoded proxy address used when discovery fails
    pub const FALLBACK_URL: &str = "https://shrutibots.site";

    /// Timeout for the address discovery request (in seconds)
    pub const DISCOVERY_TIMEOUT_SECS: u64 = 10;

    /// Timeout for the download-token request (in seconds)
    pub const TOKEN_TIMEOUT_SECS: u64 = 60;

    /// Timeout for streaming an audio file (in seconds)
    pub const AUDIO_STREAM_TIMEOUT_SECS: u64 = 300;

    /// Timeout for streaming a video file (in seconds)
    pub const VIDEO_STREAM_TIMEOUT_SECS: u64 = 600;

    /// Discovery timeout duration
    pub fn discovery_timeout() -> Duration {
        Duration::from_secs(DISCOVERY_TIMEOUT_SECS)
    }

    /// Token request timeout duration
    pub fn token_timeout() -> Duration {
        Duration::from_secs(TOKEN_TIMEOUT_SECS)
    }
}

/// yt-dlp subprocess configuration
pub mod download {
    use super::Duration;

    /// Timeout for yt-dlp commands (in seconds)
    pub const YTDLP_TIMEOUT_SECS: u64 = 120; // 2 minutes

    /// yt-dlp command timeout duration
    pub fn ytdlp_timeout() -> Duration {
        Duration::from_secs(YTDLP_TIMEOUT_SECS)
    }
}

/// Search-service configuration
pub mod search {
    /// Number of results requested for disambiguation (slider) queries
    pub const SLIDER_RESULT_LIMIT: usize = 10;
}
