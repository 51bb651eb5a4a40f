//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (ASANA_*)
//! 2. TOML config file (if ASANA_CONFIG_FILE set)
//! 3. Built-in defaults

use std::num::NonZeroUsize;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::media::ResolverConfig;
use crate::provider::SafeSearch;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (ASANA_*)
/// 2. TOML config file (if ASANA_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Region code passed to the media search provider.
    ///
    /// Set via ASANA_SEARCH_REGION environment variable.
    #[serde(default = "default_search_region")]
    pub search_region: String,

    /// Safe search level: off, moderate, strict.
    ///
    /// Set via ASANA_SAFESEARCH environment variable.
    #[serde(default = "default_safesearch")]
    pub safesearch: String,

    /// Results requested per media search.
    ///
    /// Set via ASANA_MAX_RESULTS environment variable.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Text appended to the subject when building a media query.
    ///
    /// Set via ASANA_QUERY_SUFFIX environment variable.
    #[serde(default = "default_query_suffix")]
    pub query_suffix: String,

    /// Lifetime of a resolved media outcome in seconds.
    ///
    /// Set via ASANA_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Maximum number of cached media outcomes.
    ///
    /// Set via ASANA_CACHE_CAPACITY environment variable.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Media search request timeout in milliseconds.
    ///
    /// Set via ASANA_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via ASANA_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Base URL of the Ollama server.
    ///
    /// Set via ASANA_OLLAMA_URL environment variable.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Chat model used for text generation.
    ///
    /// Set via ASANA_OLLAMA_MODEL environment variable.
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,

    /// Text generation timeout in milliseconds.
    ///
    /// Set via ASANA_GENERATION_TIMEOUT_MS environment variable.
    #[serde(default = "default_generation_timeout_ms")]
    pub generation_timeout_ms: u64,
}

fn default_search_region() -> String {
    "in-en".into()
}

fn default_safesearch() -> String {
    "moderate".into()
}

fn default_max_results() -> usize {
    5
}

fn default_query_suffix() -> String {
    " yoga pose".into()
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_cache_capacity() -> usize {
    256
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    "asana/0.1".into()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".into()
}

fn default_ollama_model() -> String {
    "phi3:mini".into()
}

fn default_generation_timeout_ms() -> u64 {
    120_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search_region: default_search_region(),
            safesearch: default_safesearch(),
            max_results: default_max_results(),
            query_suffix: default_query_suffix(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            ollama_url: default_ollama_url(),
            ollama_model: default_ollama_model(),
            generation_timeout_ms: default_generation_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Media search timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_millis(self.generation_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Parsed safe search level.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for anything other than off, moderate or strict.
    pub fn safesearch_level(&self) -> Result<SafeSearch, ConfigError> {
        self.safesearch
            .parse()
            .map_err(|_| ConfigError::Invalid { field: "safesearch".into(), reason: "must be off, moderate or strict".into() })
    }

    /// Resolver settings derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `cache_capacity` is 0 or `safesearch` is unknown.
    pub fn resolver_config(&self) -> Result<ResolverConfig, ConfigError> {
        let capacity = NonZeroUsize::new(self.cache_capacity).ok_or_else(|| ConfigError::Invalid {
            field: "cache_capacity".into(),
            reason: "must be greater than 0".into(),
        })?;

        Ok(ResolverConfig {
            ttl: self.cache_ttl(),
            capacity,
            query_suffix: self.query_suffix.clone(),
            region: self.search_region.clone(),
            safesearch: self.safesearch_level()?,
            max_results: self.max_results,
            timeout: self.timeout(),
        })
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `ASANA_`
    /// 2. TOML file from `ASANA_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("ASANA_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("ASANA_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
