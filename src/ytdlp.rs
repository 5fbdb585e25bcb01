//! yt-dlp wrappers: playlist id enumeration and format listing.
//!
//! Both run the local binary with a timeout via [`run_with_timeout`]; neither
//! downloads any media. Playlist enumeration mirrors the flags the original
//! service used (`-i --get-id --flat-playlist`), format listing goes through
//! `-J` and parses the dumped metadata.

use std::process::Stdio;

use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::core::config;
use crate::core::error::PlatformResult;
use crate::core::process::run_with_timeout;

/// One downloadable format of a video, DASH entries already filtered out.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VideoFormat {
    /// Human-readable format label, e.g. "251 - audio only (medium)"
    pub format: String,
    /// File size in bytes when yt-dlp knows it
    pub filesize: Option<u64>,
    pub format_id: String,
    /// Container extension
    pub ext: String,
    pub format_note: Option<String>,
    /// Normalized link the formats were listed for
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct DumpJson {
    #[serde(default)]
    formats: Vec<RawFormat>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    filesize: Option<f64>,
    #[serde(default)]
    format_id: Option<String>,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    format_note: Option<String>,
}

/// DASH segments can't be served as a single file, so those formats are
/// useless to the bot. Matched case-insensitively on the format label.
pub(crate) fn is_dash(format_label: &str) -> bool {
    format_label.to_lowercase().contains("dash")
}

/// Lists up to `limit` video ids of a playlist.
///
/// Runs `yt-dlp -i --get-id --flat-playlist --playlist-end {limit}` and
/// returns the non-blank stdout lines in order. On a partial failure the
/// output is used verbatim; stderr text is only consulted when stdout is
/// empty (and will then typically parse into nothing).
pub async fn playlist_ids(link: &str, limit: usize) -> PlatformResult<Vec<String>> {
    let ytdl_bin = &*config::YTDL_BIN;
    let limit_arg = limit.to_string();

    let mut cmd = Command::new(ytdl_bin);
    cmd.args([
        "-i",
        "--get-id",
        "--flat-playlist",
        "--playlist-end",
        &limit_arg,
        link,
    ])
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped());

    log::info!("Enumerating playlist: {}", link);
    let output = run_with_timeout(&mut cmd, config::download::ytdlp_timeout()).await?;

    if !output.status.success() {
        log::warn!(
            "yt-dlp exited with {} while enumerating {}; using partial output",
            output.status,
            link
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let text = if stdout.trim().is_empty() {
        String::from_utf8_lossy(&output.stderr).into_owned()
    } else {
        stdout.into_owned()
    };

    Ok(parse_id_lines(&text))
}

fn parse_id_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Lists the downloadable formats of a single video, paired with the
/// normalized link they were listed for.
///
/// Runs `yt-dlp -J --no-playlist` (metadata only, no download) and drops any
/// format whose label contains "dash" in any casing.
pub async fn list_formats(link: &str) -> PlatformResult<(Vec<VideoFormat>, String)> {
    let ytdl_bin = &*config::YTDL_BIN;

    let mut cmd = Command::new(ytdl_bin);
    cmd.args(["-J", "--no-playlist", link])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let output = run_with_timeout(&mut cmd, config::download::ytdlp_timeout()).await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(crate::core::error::PlatformError::Process(format!(
            "yt-dlp -J failed for {}: {}",
            link,
            stderr.trim()
        )));
    }

    let info: DumpJson = serde_json::from_slice(&output.stdout)?;
    Ok((collect_formats(info.formats, link), link.to_string()))
}

fn collect_formats(raw: Vec<RawFormat>, link: &str) -> Vec<VideoFormat> {
    raw.into_iter()
        .filter_map(|f| {
            let label = f.format.unwrap_or_default();
            if is_dash(&label) {
                return None;
            }
            Some(VideoFormat {
                format: label,
                filesize: f.filesize.map(|s| s as u64),
                format_id: f.format_id.unwrap_or_default(),
                ext: f.ext.unwrap_or_default(),
                format_note: f.format_note,
                link: link.to_string(),
            })
        })
        .collect()
}
