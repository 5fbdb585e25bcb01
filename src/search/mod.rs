//! Search-service client.
//!
//! Queries the ranked video search endpoint (`GET {base}/search?q=...`) and
//! reshapes the top results into the record shapes the bot consumes: full
//! details for one video, a track record for queueing, or a single entry of
//! a 10-result list for disambiguation keyboards.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::core::config;
use crate::core::error::{PlatformError, PlatformResult};
use crate::core::utils::{strip_query, time_to_seconds};

/// One ranked result as returned by the search service.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    /// Duration display string, absent for live streams
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchResult>,
}

/// Full details of the top search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetails {
    pub title: String,
    /// Display string, e.g. "3:45"; empty for live streams
    pub duration: String,
    pub duration_secs: u64,
    /// Query-stripped thumbnail URL
    pub thumbnail: String,
    pub id: String,
}

/// Track record for the top search result, as consumed by the play queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    pub link: String,
    pub vidid: String,
    pub duration_min: String,
    pub thumb: String,
}

/// One entry of a disambiguation (slider) query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderEntry {
    pub title: String,
    pub duration: String,
    pub thumbnail: String,
    pub id: String,
}

impl SearchResult {
    fn duration_display(&self) -> String {
        self.duration.clone().unwrap_or_default()
    }

    fn stripped_thumbnail(&self) -> String {
        self.thumbnails
            .first()
            .map(|t| strip_query(&t.url).to_string())
            .unwrap_or_default()
    }
}

/// Client for the metadata search service.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    base: String,
}

impl SearchClient {
    pub fn new(client: Client, base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn search(&self, query: &str, limit: usize) -> PlatformResult<Vec<SearchResult>> {
        let response = self
            .client
            .get(format!("{}/search", self.base))
            .query(&[("q", query), ("limit", &limit.to_string())])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(PlatformError::Status(response.status()));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.result)
    }

    /// Details of the single top result for `query`.
    pub async fn details(&self, query: &str) -> PlatformResult<VideoDetails> {
        let results = self.search(query, 1).await?;
        let top = results.first().ok_or(PlatformError::EmptyResults)?;

        let duration = top.duration_display();
        Ok(VideoDetails {
            title: top.title.clone(),
            duration_secs: time_to_seconds(&duration),
            duration,
            thumbnail: top.stripped_thumbnail(),
            id: top.id.clone(),
        })
    }

    /// Track record plus id for the single top result.
    pub async fn track(&self, query: &str) -> PlatformResult<(TrackMetadata, String)> {
        let results = self.search(query, 1).await?;
        let top = results.first().ok_or(PlatformError::EmptyResults)?;

        let track = TrackMetadata {
            title: top.title.clone(),
            link: top.link.clone(),
            vidid: top.id.clone(),
            duration_min: top.duration_display(),
            thumb: top.stripped_thumbnail(),
        };
        Ok((track, top.id.clone()))
    }

    /// Entry `index` of a 10-result query, for disambiguation keyboards.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` when `index` is past the end of the result list;
    /// unlike other failures this one is meant to reach the caller.
    pub async fn slider(&self, query: &str, index: usize) -> PlatformResult<SliderEntry> {
        let results = self.search(query, config::search::SLIDER_RESULT_LIMIT).await?;
        let count = results.len();
        let entry = results
            .into_iter()
            .nth(index)
            .ok_or(PlatformError::IndexOutOfRange { index, count })?;

        Ok(SliderEntry {
            title: entry.title.clone(),
            duration: entry.duration_display(),
            thumbnail: entry.stripped_thumbnail(),
            id: entry.id,
        })
    }
}
