//! MCP tool implementations.
//!
//! This module contains all tools exposed by the asana server.

pub mod diet_plan;
pub mod media_lookup;
pub mod pose_info;
