//! Tubefetch - YouTube platform adapter for Telegram music bots
//!
//! This library resolves user-supplied video references (URLs, bare ids, or
//! reply-to messages) into structured metadata and locally cached media
//! files, delegating the heavy lifting to external collaborators: a remote
//! download-proxy service, a metadata search service, and the local yt-dlp
//! binary.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, process and parsing helpers
//! - `download`: proxy address discovery and streaming media download
//! - `search`: search-service client (details / track / slider shapes)
//! - `telegram`: URL extraction from Telegram messages
//! - `ytdlp`: playlist enumeration and format listing via the local binary
//! - `youtube`: the facade tying it all together

pub mod core;
pub mod download;
pub mod search;
pub mod telegram;
pub mod youtube;
pub mod ytdlp;

// Re-export commonly used types for convenience
pub use crate::core::{config, PlatformError, PlatformResult};
pub use crate::download::{ApiEndpoint, MediaFetcher, MediaKind};
pub use crate::search::{SearchClient, SliderEntry, TrackMetadata, VideoDetails};
pub use crate::telegram::SearchOrder;
pub use crate::youtube::{VideoRef, YouTube};
pub use crate::ytdlp::VideoFormat;
