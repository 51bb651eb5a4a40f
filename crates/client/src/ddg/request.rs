//! DuckDuckGo request parameters and token extraction.

use std::sync::LazyLock;

use asana_core::{SafeSearch, SearchQuery};
use regex::Regex;

/// Matches `vqd="4-123..."`, `vqd='4-123...'` and `vqd=4-123...&`.
static VQD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"vqd=["']?([0-9]+-[0-9-]+)["'&]"#).expect("vqd pattern is valid"));

/// Extract the `vqd` search token from the DuckDuckGo landing page.
pub fn extract_vqd(html: &str) -> Option<String> {
    VQD_PATTERN
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Safe search code understood by the `i.js` endpoint.
pub fn image_safesearch(level: SafeSearch) -> &'static str {
    match level {
        SafeSearch::Strict | SafeSearch::Moderate => "1",
        SafeSearch::Off => "-1",
    }
}

/// Safe search code understood by the `v.js` endpoint.
pub fn video_safesearch(level: SafeSearch) -> &'static str {
    match level {
        SafeSearch::Strict => "1",
        SafeSearch::Moderate => "-1",
        SafeSearch::Off => "-2",
    }
}

/// Query parameters for an image search.
///
/// The empty filter slots are time, size, color, type, layout and license.
pub fn image_params(query: &SearchQuery, vqd: &str) -> Vec<(&'static str, String)> {
    vec![
        ("l", query.region.clone()),
        ("o", "json".to_string()),
        ("q", query.text.clone()),
        ("vqd", vqd.to_string()),
        ("f", ",,,,,".to_string()),
        ("p", image_safesearch(query.safesearch).to_string()),
    ]
}

/// Query parameters for a video search.
///
/// The empty filter slots are time, resolution, duration and license.
pub fn video_params(query: &SearchQuery, vqd: &str) -> Vec<(&'static str, String)> {
    vec![
        ("l", query.region.clone()),
        ("o", "json".to_string()),
        ("q", query.text.clone()),
        ("vqd", vqd.to_string()),
        ("f", ",,,".to_string()),
        ("p", video_safesearch(query.safesearch).to_string()),
    ]
}
