//! Unified error types for asana.

use rmcp::model::{ErrorCode, ErrorData as McpError};

use crate::config::ConfigError;
use crate::provider::ProviderError;

/// Unified error types for the asana server.
///
/// Media lookups never produce one of these; a failed lookup is a
/// [`crate::MediaOutcome::NotFound`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty pose name).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Text generation backend failed.
    #[error("GENERATION_FAILED: {0}")]
    GenerationFailed(ProviderError),

    /// Configuration could not be loaded or validated.
    #[error("CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::GenerationFailed(e) => (-32000, e.to_string()),
            Error::Config(e) => (-32002, e.to_string()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
