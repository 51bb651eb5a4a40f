//! media_lookup tool implementation.
//!
//! Resolves a pose name to an image or video URL. Search failures are
//! reported as `found: false`, never as a tool error.

use asana_core::{MediaKind, MediaResolver};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for media_lookup tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MediaLookupParams {
    /// Subject to look up, usually a pose name.
    pub subject: String,

    /// Media kind: "image" (default) or "video".
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "image".into()
}

/// Output structure for media_lookup tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MediaLookupOutput {
    /// Subject as supplied by the caller.
    pub subject: String,
    pub kind: MediaKind,
    /// Resolved URL, if any.
    pub url: Option<String>,
    pub found: bool,
}

/// Implementation of the media_lookup tool.
pub async fn media_lookup_impl(resolver: &MediaResolver, params: MediaLookupParams) -> Result<CallToolResult, McpError> {
    let kind: MediaKind = params.kind.parse()?;

    let outcome = resolver.resolve(&params.subject, kind).await;

    let found = outcome.is_found();
    let output = MediaLookupOutput { subject: params.subject, kind, url: outcome.into_option(), found };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use asana_core::{ProviderError, ResolverConfig, SearchProvider, SearchQuery, SearchResult};
    use async_trait::async_trait;

    use super::*;
    use crate::tools::testing::text_of;

    struct StaticProvider {
        response: Result<Vec<SearchResult>, ProviderError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SearchProvider for StaticProvider {
        async fn search(&self, _query: &SearchQuery) -> Result<Vec<SearchResult>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn resolver(response: Result<Vec<SearchResult>, ProviderError>) -> (MediaResolver, Arc<StaticProvider>) {
        let provider = Arc::new(StaticProvider { response, calls: AtomicUsize::new(0) });
        (MediaResolver::new(provider.clone(), ResolverConfig::default()), provider)
    }

    fn output(result: &CallToolResult) -> MediaLookupOutput {
        serde_json::from_str(&text_of(result)).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let (resolver, _) = resolver(Ok(vec![
            SearchResult::new().with("image", "data:base64,abcd"),
            SearchResult::new().with("thumbnail", "https://img.example/t.jpg"),
        ]));
        let params = MediaLookupParams { subject: "Tadasana ".into(), kind: "image".into() };

        let result = media_lookup_impl(&resolver, params).await.unwrap();
        let out = output(&result);
        assert!(out.found);
        assert_eq!(out.url.as_deref(), Some("https://img.example/t.jpg"));
        assert_eq!(out.subject, "Tadasana ");
        assert_eq!(out.kind, MediaKind::Image);
    }

    #[tokio::test]
    async fn test_provider_failure_is_not_an_error() {
        let (resolver, _) = resolver(Err(ProviderError::Timeout));
        let params = MediaLookupParams { subject: "Tadasana".into(), kind: "video".into() };

        let result = media_lookup_impl(&resolver, params).await.unwrap();
        assert!(!result.is_error.unwrap_or(false));
        let out = output(&result);
        assert!(!out.found);
        assert!(out.url.is_none());
    }

    #[tokio::test]
    async fn test_repeat_lookup_hits_cache() {
        let (resolver, provider) = resolver(Ok(vec![]));

        for subject in ["Downward Dog", "downward dog "] {
            let params = MediaLookupParams { subject: subject.into(), kind: "image".into() };
            media_lookup_impl(&resolver, params).await.unwrap();
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_kind() {
        let (resolver, provider) = resolver(Ok(vec![]));
        let params = MediaLookupParams { subject: "Tadasana".into(), kind: "gif".into() };

        let err = media_lookup_impl(&resolver, params).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_default_kind() {
        let params: MediaLookupParams = serde_json::from_str(r#"{"subject": "Crow"}"#).unwrap();
        assert_eq!(params.kind, "image");
    }
}
