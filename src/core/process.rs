//! Process execution utilities with timeout support
//!
//! Provides a helper for running yt-dlp with a configurable timeout so a hung
//! extraction never blocks the caller indefinitely.

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

use crate::core::error::PlatformError;

/// Run an async Command with a timeout.
///
/// Returns the process Output on success, or a PlatformError on timeout/IO failure.
pub async fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output, PlatformError> {
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(PlatformError::Io(e)),
        Err(_) => Err(PlatformError::Process(format!(
            "process timed out after {}s",
            timeout.as_secs()
        ))),
    }
}
