//! Proxy endpoint discovery and media download

pub mod endpoint;
pub mod fetch;

pub use endpoint::ApiEndpoint;
pub use fetch::{derive_video_id, MediaFetcher, MediaKind};
