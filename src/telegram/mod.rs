//! Telegram message helpers

pub mod link;

pub use link::{extract_url, SearchOrder};
