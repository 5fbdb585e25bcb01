//! Media download through the proxy service.
//!
//! Two round trips per download: a token request against `{base}/download`,
//! then a streaming fetch of `{base}/stream/{id}` with the token echoed in
//! the `X-Download-Token` header. Finished files land in the local cache
//! directory as `{id}.mp3` / `{id}.mp4`; a file already on disk is returned
//! without any network traffic.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::io::AsyncWriteExt;

use crate::core::config;
use crate::core::error::{PlatformError, PlatformResult};
use crate::download::endpoint::ApiEndpoint;

/// Requested media type for a proxy download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Value of the `type` query parameter the proxy expects.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }

    /// Target container extension in the cache directory.
    pub fn ext(self) -> &'static str {
        match self {
            MediaKind::Audio => "mp3",
            MediaKind::Video => "mp4",
        }
    }

    /// Streaming timeout; videos get twice the time audio does.
    pub fn stream_timeout(self) -> Duration {
        match self {
            MediaKind::Audio => Duration::from_secs(config::api::AUDIO_STREAM_TIMEOUT_SECS),
            MediaKind::Video => Duration::from_secs(config::api::VIDEO_STREAM_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    download_token: Option<String>,
}

/// Derives the video id from a reference.
///
/// References carrying a `v=` parameter yield the substring between the last
/// `v=` and the next `&`; anything else is treated as a bare id. Ids shorter
/// than 3 characters are rejected before any network call.
pub fn derive_video_id(reference: &str) -> PlatformResult<&str> {
    let id = match reference.rfind("v=") {
        Some(pos) => {
            let rest = &reference[pos + 2..];
            rest.split('&').next().unwrap_or(rest)
        }
        None => reference,
    };

    if id.len() < 3 {
        return Err(PlatformError::InvalidIdentifier(id.to_string()));
    }
    Ok(id)
}

/// Client for the download-proxy service.
#[derive(Debug, Clone)]
pub struct MediaFetcher {
    client: Client,
    endpoint: ApiEndpoint,
    download_dir: PathBuf,
}

impl MediaFetcher {
    pub fn new(client: Client, endpoint: ApiEndpoint, download_dir: impl AsRef<Path>) -> Self {
        Self {
            client,
            endpoint,
            download_dir: download_dir.as_ref().to_path_buf(),
        }
    }

    /// Downloads the media for `reference` into the cache directory.
    ///
    /// Returns the destination path. A cache hit short-circuits before any
    /// network call; on a miss the token + stream round trips run and the
    /// body is written chunk-by-chunk, overwriting any partial prior content.
    pub async fn fetch(&self, reference: &str, kind: MediaKind) -> PlatformResult<PathBuf> {
        let video_id = derive_video_id(reference)?;
        let dest = self.download_dir.join(format!("{}.{}", video_id, kind.ext()));

        if dest.exists() {
            log::debug!("Cache hit for {}", dest.display());
            return Ok(dest);
        }

        let token = self.request_token(video_id, kind).await?;
        self.stream_to_file(video_id, kind, &token, &dest).await?;

        log::info!("Downloaded {} to {}", video_id, dest.display());
        Ok(dest)
    }

    async fn request_token(&self, video_id: &str, kind: MediaKind) -> PlatformResult<String> {
        let response = self
            .client
            .get(format!("{}/download", self.endpoint.base()))
            .query(&[("url", video_id), ("type", kind.as_str())])
            .timeout(config::api::token_timeout())
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(PlatformError::Status(response.status()));
        }

        let body: TokenResponse = response.json().await?;
        body.download_token
            .filter(|token| !token.is_empty())
            .ok_or(PlatformError::MissingToken)
    }

    async fn stream_to_file(
        &self,
        video_id: &str,
        kind: MediaKind,
        token: &str,
        dest: &Path,
    ) -> PlatformResult<()> {
        let response = self
            .client
            .get(format!(
                "{}/stream/{}?type={}",
                self.endpoint.base(),
                video_id,
                kind.as_str()
            ))
            .header("X-Download-Token", token)
            .timeout(kind.stream_timeout())
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(PlatformError::Status(response.status()));
        }

        tokio::fs::create_dir_all(&self.download_dir).await?;
        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        Ok(())
    }
}
