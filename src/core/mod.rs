//! Core utilities: configuration, errors, logging, process helpers

pub mod config;
pub mod error;
pub mod logging;
pub mod process;
pub mod utils;

pub use error::{PlatformError, PlatformResult};
