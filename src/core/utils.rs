/// Parses a colon-delimited duration display string into total seconds.
///
/// Accepts `SS`, `MM:SS` and `HH:MM:SS` shapes as produced by the search
/// service. Empty strings (live streams) and unparseable segments count as 0.
///
/// # Example
///
/// ```
/// use tubefetch::core::utils::time_to_seconds;
///
/// assert_eq!(time_to_seconds("3:45"), 225);
/// assert_eq!(time_to_seconds("1:01:05"), 3665);
/// assert_eq!(time_to_seconds(""), 0);
/// ```
pub fn time_to_seconds(time: &str) -> u64 {
    time.split(':')
        .fold(0, |acc, part| acc * 60 + part.trim().parse::<u64>().unwrap_or(0))
}

/// Strips everything from the first `?` of a URL.
///
/// Thumbnail URLs from the search service carry sizing query parameters that
/// the bot never wants; the original always serves them stripped.
pub fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
