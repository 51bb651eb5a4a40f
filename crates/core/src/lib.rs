//! Core types and shared functionality for asana.
//!
//! This crate provides:
//! - Media resolution with a bounded, time-limited in-memory cache
//! - Collaborator traits for search and text generation
//! - Prompt templates for pose insights and diet plans
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod media;
pub mod prompts;
pub mod provider;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use media::{CacheKey, MediaKind, MediaOutcome, MediaResolver, ResolverConfig, SearchQuery, SearchResult};
pub use prompts::{DietProfile, diet_plan_prompt, pose_info_prompt};
pub use provider::{ProviderError, SafeSearch, SearchProvider, TextGenerator};
