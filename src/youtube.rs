//! YouTube platform facade.
//!
//! Single entry point a bot holds onto: resolves the download-proxy address
//! once at construction, then exposes the platform operations (existence
//! check, link extraction, metadata lookup, playlist enumeration, format
//! listing, media download) as uniformly async methods. Every method accepts
//! either a full link or a bare video id plus a flag, like the rest of the
//! bot's platform layer.

use std::path::{Path, PathBuf};

use lazy_regex::{lazy_regex, Lazy, Regex};
use reqwest::Client;
use teloxide::types::Message;

use crate::core::config;
use crate::core::error::PlatformResult;
use crate::download::{ApiEndpoint, MediaFetcher, MediaKind};
use crate::search::{SearchClient, SliderEntry, TrackMetadata, VideoDetails};
use crate::telegram::link::{extract_url, SearchOrder};
use crate::ytdlp::{self, VideoFormat};

static YOUTUBE_DOMAIN: Lazy<Regex> = lazy_regex!(r"(youtube\.com|youtu\.be)");

const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";
const PLAYLIST_BASE: &str = "https://youtube.com/playlist?list=";

/// A user-supplied video reference: a full URL or a bare video id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoRef<'a> {
    Link(&'a str),
    Id(&'a str),
}

impl<'a> VideoRef<'a> {
    /// Builds a reference from the `(link, videoid)` pair the bot passes around.
    pub fn from_parts(link: &'a str, videoid: bool) -> Self {
        if videoid {
            VideoRef::Id(link)
        } else {
            VideoRef::Link(link)
        }
    }

    /// Normalized single-video URL: bare ids get the watch prefix, full
    /// links are truncated at the first `&`.
    pub fn watch_url(&self) -> String {
        match self {
            VideoRef::Id(id) => format!("{}{}", WATCH_BASE, id),
            VideoRef::Link(link) => link.split('&').next().unwrap_or(link).to_string(),
        }
    }

    /// Normalized playlist URL: bare ids get the playlist prefix.
    pub fn playlist_url(&self) -> String {
        match self {
            VideoRef::Id(id) => format!("{}{}", PLAYLIST_BASE, id),
            VideoRef::Link(link) => link.split('&').next().unwrap_or(link).to_string(),
        }
    }

    /// The reference as handed to the media fetcher, query string intact
    /// (the fetcher derives the id itself).
    pub fn raw_url(&self) -> String {
        match self {
            VideoRef::Id(id) => format!("{}{}", WATCH_BASE, id),
            VideoRef::Link(link) => (*link).to_string(),
        }
    }
}

/// YouTube platform adapter.
pub struct YouTube {
    endpoint: ApiEndpoint,
    fetcher: MediaFetcher,
    search: SearchClient,
}

impl YouTube {
    /// Builds the adapter with configuration defaults, awaiting proxy
    /// address discovery. Hosts call this once at startup.
    pub async fn new() -> Self {
        let client = Client::new();
        let endpoint = ApiEndpoint::resolve(&client).await;
        Self::with_parts(
            client,
            endpoint,
            config::SEARCH_API_URL.as_str(),
            config::download_folder(),
        )
    }

    /// Builds the adapter from already-resolved parts.
    pub fn with_parts(
        client: Client,
        endpoint: ApiEndpoint,
        search_base: impl Into<String>,
        download_dir: impl AsRef<Path>,
    ) -> Self {
        let search = SearchClient::new(client.clone(), search_base);
        let fetcher = MediaFetcher::new(client, endpoint.clone(), download_dir);
        Self {
            endpoint,
            fetcher,
            search,
        }
    }

    /// The proxy endpoint this adapter was constructed with.
    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    /// Whether the reference points at a known YouTube domain.
    pub async fn exists(&self, link: &str, videoid: bool) -> bool {
        YOUTUBE_DOMAIN.is_match(&VideoRef::from_parts(link, videoid).raw_url())
    }

    /// First URL carried by the message (or its reply target), per `order`.
    pub async fn url(&self, message: &Message, order: SearchOrder) -> Option<String> {
        extract_url(message, order)
    }

    /// Details of the top search result for the reference.
    pub async fn details(&self, link: &str, videoid: bool) -> PlatformResult<VideoDetails> {
        self.search
            .details(&VideoRef::from_parts(link, videoid).watch_url())
            .await
    }

    /// Track record plus id of the top search result for the reference.
    pub async fn track(&self, link: &str, videoid: bool) -> PlatformResult<(TrackMetadata, String)> {
        self.search
            .track(&VideoRef::from_parts(link, videoid).watch_url())
            .await
    }

    /// Entry `index` of a 10-result search, for disambiguation keyboards.
    pub async fn slider(
        &self,
        link: &str,
        index: usize,
        videoid: bool,
    ) -> PlatformResult<SliderEntry> {
        self.search
            .slider(&VideoRef::from_parts(link, videoid).watch_url(), index)
            .await
    }

    /// Up to `limit` video ids of the referenced playlist.
    pub async fn playlist(
        &self,
        link: &str,
        limit: usize,
        videoid: bool,
    ) -> PlatformResult<Vec<String>> {
        ytdlp::playlist_ids(&VideoRef::from_parts(link, videoid).playlist_url(), limit).await
    }

    /// Downloadable formats of the referenced video (DASH filtered out),
    /// paired with the normalized link they were listed for.
    pub async fn formats(
        &self,
        link: &str,
        videoid: bool,
    ) -> PlatformResult<(Vec<VideoFormat>, String)> {
        ytdlp::list_formats(&VideoRef::from_parts(link, videoid).watch_url()).await
    }

    /// Downloads the referenced media through the proxy.
    ///
    /// All failure kinds are collapsed to `None` here (and logged); callers
    /// that need the specific cause use [`MediaFetcher::fetch`] directly.
    pub async fn download(&self, link: &str, video: bool, videoid: bool) -> Option<PathBuf> {
        let reference = VideoRef::from_parts(link, videoid).raw_url();
        let kind = if video {
            MediaKind::Video
        } else {
            MediaKind::Audio
        };

        match self.fetcher.fetch(&reference, kind).await {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Download failed for {}: {}", reference, e);
                None
            }
        }
    }
}
