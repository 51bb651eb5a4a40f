//! DuckDuckGo response types and normalization.

use asana_core::SearchResult;
use serde::Deserialize;

/// Raw JSON envelope from `i.js` and `v.js`.
#[derive(Debug, Deserialize)]
pub struct DdgResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Individual image result from DuckDuckGo.
#[derive(Debug, Deserialize)]
pub struct ImageRow {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Individual video result from DuckDuckGo.
#[derive(Debug, Deserialize)]
pub struct VideoRow {
    /// Watch page URL.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub embed_url: Option<String>,
    #[serde(default)]
    pub images: Option<VideoImages>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VideoImages {
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
}

impl From<ImageRow> for SearchResult {
    fn from(row: ImageRow) -> Self {
        let mut result = SearchResult::new();
        result.insert_opt("image", row.image);
        result.insert_opt("thumbnail", row.thumbnail);
        result.insert_opt("url", row.url);
        result.insert_opt("title", row.title);
        result.insert_opt("source", row.source);
        result
    }
}

impl From<VideoRow> for SearchResult {
    fn from(row: VideoRow) -> Self {
        let thumbnail = row.images.and_then(|i| i.medium.or(i.large).or(i.small));

        let mut result = SearchResult::new();
        result.insert_opt("content", row.content);
        result.insert_opt("href", row.embed_url);
        result.insert_opt("thumbnail", thumbnail);
        result.insert_opt("title", row.title);
        result.insert_opt("publisher", row.publisher);
        result
    }
}

/// Normalize raw rows in provider order, keeping at most `max_results`.
pub fn normalize<T: Into<SearchResult>>(raw: DdgResponse<T>, max_results: usize) -> Vec<SearchResult> {
    raw.results.into_iter().take(max_results).map(Into::into).collect()
}
