//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_results` is outside 1-50
    /// - `cache_ttl_secs` or `cache_capacity` is 0
    /// - `timeout_ms` or `generation_timeout_ms` is below 100ms or above 5 minutes
    /// - `user_agent` or `ollama_model` is empty
    /// - `ollama_url` is not an absolute http(s) URL
    /// - `safesearch` is not off, moderate or strict
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=50).contains(&self.max_results) {
            return Err(invalid("max_results", "must be between 1 and 50"));
        }

        if self.cache_ttl_secs == 0 {
            return Err(invalid("cache_ttl_secs", "must be greater than 0"));
        }
        if self.cache_capacity == 0 {
            return Err(invalid("cache_capacity", "must be greater than 0"));
        }

        for (field, value) in [("timeout_ms", self.timeout_ms), ("generation_timeout_ms", self.generation_timeout_ms)] {
            if value < 100 {
                return Err(invalid(field, "must be at least 100ms"));
            }
            if value > 300_000 {
                return Err(invalid(field, "must not exceed 5 minutes (300000ms)"));
            }
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }
        if self.ollama_model.trim().is_empty() {
            return Err(invalid("ollama_model", "must not be empty"));
        }

        match url::Url::parse(&self.ollama_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(_) => return Err(invalid("ollama_url", "scheme must be http or https")),
            Err(_) => return Err(invalid("ollama_url", "must be an absolute URL")),
        }

        self.safesearch_level()?;

        if self.search_region.trim().is_empty() {
            tracing::warn!("search_region is empty; the provider default region will apply");
        }

        Ok(())
    }
}
