//! Ollama chat client.
//!
//! Sends a single user message to `/api/chat` with streaming disabled and
//! returns the assistant's markdown reply.

use std::sync::Arc;
use std::time::{Duration, Instant};

use asana_core::{ProviderError, TextGenerator};
use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};

use crate::ClientError;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

const DEFAULT_MODEL: &str = "phi3:mini";

/// Local models can take a while on first load.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Ollama client configuration.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Server URL (default: http://localhost:11434).
    pub base_url: String,
    /// Chat model name (default: phi3:mini).
    pub model: String,
    /// Request timeout (default: 120s).
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: "asana/0.1".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub message: ReplyMessage,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

/// Ollama chat client.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self, ClientError> {
        if config.model.trim().is_empty() {
            return Err(ClientError::InvalidConfig("model cannot be empty".into()));
        }
        url::Url::parse(&config.base_url).map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send one user prompt and return the reply content.
    pub async fn chat(&self, prompt: &str) -> Result<String, ClientError> {
        let start = Instant::now();
        let url = format!("{}/api/chat", self.config.base_url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            stream: false,
        };

        tracing::debug!("sending chat request: model={} prompt_chars={}", self.config.model, prompt.len());

        let response = self
            .http
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(ClientError::RateLimited);
        }
        if status.is_client_error() || status.is_server_error() {
            return Err(ClientError::HttpError { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let reply: ChatResponse = serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))?;

        if reply.message.content.trim().is_empty() {
            return Err(ClientError::Parse("empty chat response".into()));
        }

        tracing::debug!("chat completed in {:?}, {} chars", start.elapsed(), reply.message.content.len());
        Ok(reply.message.content)
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        Ok(self.chat(prompt).await?)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(status: u16, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let raw = read_request(&mut socket).await;
            let reply =
                format!("HTTP/1.1 {status} X\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}", body.len());
            socket.write_all(reply.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            raw
        });
        (format!("http://{addr}"), handle)
    }

    /// Read headers plus a `content-length` body.
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&raw).into_owned();
            if let Some((head, body)) = text.split_once("\r\n\r\n") {
                let length = head
                    .lines()
                    .find_map(|line| line.to_ascii_lowercase().strip_prefix("content-length:").map(|v| v.trim().to_string()))
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(0);
                if body.len() >= length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&raw).into_owned()
    }

    fn client(base_url: String) -> OllamaClient {
        OllamaClient::new(OllamaConfig { base_url, ..Default::default() }).unwrap()
    }

    #[test]
    fn test_request_serialization() {
        let req = ChatRequest {
            model: "phi3:mini",
            messages: vec![ChatMessage { role: "user", content: "hello" }],
            stream: false,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "phi3:mini", "messages": [{"role": "user", "content": "hello"}], "stream": false})
        );
    }

    #[test]
    fn test_response_deserialization() {
        let json = r###"{"model":"phi3:mini","created_at":"2024-05-01T00:00:00Z","message":{"role":"assistant","content":"## Benefits"},"done":true}"###;
        let reply: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(reply.message.role, "assistant");
        assert_eq!(reply.message.content, "## Benefits");
        assert!(reply.done);
    }

    #[test]
    fn test_new_rejects_empty_model() {
        let result = OllamaClient::new(OllamaConfig { model: " ".into(), ..Default::default() });
        assert!(matches!(result, Err(ClientError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_generate_returns_content() {
        let (base, request) =
            serve_once(200, r#"{"message":{"role":"assistant","content":"**Key Benefits**"},"done":true}"#).await;

        let text = client(base).generate("tell me about tree pose").await.unwrap();
        assert_eq!(text, "**Key Benefits**");

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /api/chat"));
        assert!(raw.contains(r#""stream":false"#));
        assert!(raw.contains("tell me about tree pose"));
    }

    #[tokio::test]
    async fn test_generate_http_error() {
        let (base, _request) = serve_once(500, r#"{"error":"model not found"}"#).await;
        let result = client(base).generate("hi").await;
        assert_eq!(result, Err(ProviderError::HttpStatus(500)));
    }

    #[tokio::test]
    async fn test_generate_empty_content() {
        let (base, _request) = serve_once(200, r#"{"message":{"role":"assistant","content":""},"done":true}"#).await;
        let result = client(base).generate("hi").await;
        assert!(matches!(result, Err(ProviderError::Parse(_))));
    }
}
