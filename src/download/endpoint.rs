//! Download-proxy address discovery.
//!
//! The proxy operator publishes the current base URL as a plaintext paste;
//! the adapter fetches it once at startup and falls back to a hardcoded
//! address when the paste is unreachable. Discovery never fails the caller.

use reqwest::{Client, StatusCode};

use crate::core::config;

/// Resolved base address of the download-proxy service.
///
/// Produced once by [`ApiEndpoint::resolve`] and owned by the facade for the
/// lifetime of the process; re-resolution only happens by constructing a new
/// facade.
#[derive(Debug, Clone)]
pub struct ApiEndpoint {
    base: String,
}

impl ApiEndpoint {
    /// Discovers the proxy base URL.
    ///
    /// Honors the `TUBEFETCH_API_URL` override, otherwise performs one
    /// bounded fetch of the paste location. Any failure (non-200, timeout,
    /// empty body) silently falls back to [`config::api::FALLBACK_URL`].
    pub async fn resolve(client: &Client) -> Self {
        if let Some(explicit) = config::API_URL_OVERRIDE.as_deref() {
            log::info!("Using explicit proxy URL from TUBEFETCH_API_URL");
            return Self::from_base(explicit);
        }
        Self::discover(client, config::api::ENDPOINT_SOURCE_URL).await
    }

    /// Discovery against an explicit paste URL.
    pub async fn discover(client: &Client, source_url: &str) -> Self {
        let response = client
            .get(source_url)
            .timeout(config::api::discovery_timeout())
            .send()
            .await;

        match response {
            Ok(resp) if resp.status() == StatusCode::OK => match resp.text().await {
                Ok(body) if !body.trim().is_empty() => {
                    log::info!("Proxy URL loaded successfully");
                    Self::from_base(body.trim())
                }
                _ => {
                    log::warn!("Proxy URL paste was empty, using fallback");
                    Self::from_base(config::api::FALLBACK_URL)
                }
            },
            Ok(resp) => {
                log::warn!(
                    "Proxy URL discovery returned status {}, using fallback",
                    resp.status()
                );
                Self::from_base(config::api::FALLBACK_URL)
            }
            Err(e) => {
                log::warn!("Proxy URL discovery failed ({}), using fallback", e);
                Self::from_base(config::api::FALLBACK_URL)
            }
        }
    }

    /// Wraps an already-known base URL, trimming any trailing slash.
    pub fn from_base(base: impl AsRef<str>) -> Self {
        Self {
            base: base.as_ref().trim().trim_end_matches('/').to_string(),
        }
    }

    /// The proxy base URL, without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base_trims_trailing_slash() {
        let ep = ApiEndpoint::from_base("https://example.com/\n");
        assert_eq!(ep.base(), "https://example.com");
    }

    #[test]
    fn test_from_base_keeps_clean_url() {
        let ep = ApiEndpoint::from_base("https://shrutibots.site");
        assert_eq!(ep.base(), "https://shrutibots.site");
    }
}
