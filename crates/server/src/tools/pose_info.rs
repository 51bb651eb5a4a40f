//! pose_info tool implementation.
//!
//! Asks the text generator for benefits, steps and precautions of an asana.

use asana_core::{Error, TextGenerator, pose_info_prompt};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for pose_info tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PoseInfoParams {
    /// Asana name, e.g. "Tadasana" or "Downward Dog".
    pub pose_name: String,
}

/// Implementation of the pose_info tool.
pub async fn pose_info_impl(generator: &dyn TextGenerator, params: PoseInfoParams) -> Result<CallToolResult, McpError> {
    if params.pose_name.trim().is_empty() {
        return Err(Error::InvalidInput("pose_name cannot be empty".into()).into());
    }

    let prompt = pose_info_prompt(&params.pose_name);
    let markdown = generator.generate(&prompt).await.map_err(Error::GenerationFailed)?;

    tracing::debug!(pose = %params.pose_name, chars = markdown.len(), "pose insights generated");

    Ok(CallToolResult::success(vec![Content::text(markdown)]))
}
