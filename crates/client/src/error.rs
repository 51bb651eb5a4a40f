//! HTTP client error types.

use std::sync::Arc;

use asana_core::ProviderError;

/// Errors from the DuckDuckGo and Ollama clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Client configuration rejected before any request is made.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// DuckDuckGo did not hand out a search token.
    #[error("missing vqd token for query: {0}")]
    MissingToken(String),

    /// Rate limited or blocked by the upstream service.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ClientError::Timeout } else { ClientError::Network(Arc::new(err)) }
    }
}

impl From<ClientError> for ProviderError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Timeout => ProviderError::Timeout,
            ClientError::RateLimited => ProviderError::RateLimited,
            ClientError::HttpError { status } => ProviderError::HttpStatus(status),
            ClientError::Network(e) => ProviderError::Network(e.to_string()),
            ClientError::Parse(msg) => ProviderError::Parse(msg),
            ClientError::MissingToken(_) => ProviderError::Parse(err.to_string()),
            ClientError::InvalidConfig(msg) => ProviderError::Other(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::MissingToken("tree yoga pose".to_string());
        assert!(err.to_string().contains("vqd"));

        let err = ClientError::HttpError { status: 418 };
        assert_eq!(err.to_string(), "HTTP error: 418");
    }

    #[test]
    fn test_into_provider_error() {
        assert_eq!(ProviderError::from(ClientError::Timeout), ProviderError::Timeout);
        assert_eq!(ProviderError::from(ClientError::RateLimited), ProviderError::RateLimited);
        assert_eq!(ProviderError::from(ClientError::HttpError { status: 502 }), ProviderError::HttpStatus(502));
        assert!(matches!(ProviderError::from(ClientError::MissingToken("q".into())), ProviderError::Parse(_)));
        assert!(matches!(ProviderError::from(ClientError::InvalidConfig("x".into())), ProviderError::Other(_)));
    }
}
