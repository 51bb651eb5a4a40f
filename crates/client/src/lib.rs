//! Client code for asana.
//!
//! This crate provides the HTTP collaborators behind the core traits:
//! a DuckDuckGo media search provider and an Ollama chat generator.

pub mod ddg;
pub mod error;
pub mod ollama;

pub use ddg::{DdgClient, DdgConfig};
pub use error::ClientError;
pub use ollama::{OllamaClient, OllamaConfig};
