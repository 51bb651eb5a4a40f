//! diet_plan tool implementation.

use asana_core::{DietProfile, Error, TextGenerator, diet_plan_prompt};
use rmcp::{ErrorData as McpError, model::*};

/// Implementation of the diet_plan tool.
pub async fn diet_plan_impl(generator: &dyn TextGenerator, profile: DietProfile) -> Result<CallToolResult, McpError> {
    profile.validate()?;

    let prompt = diet_plan_prompt(&profile);
    let markdown = generator.generate(&prompt).await.map_err(Error::GenerationFailed)?;

    tracing::debug!(goal = %profile.goal, diet = %profile.diet_type, chars = markdown.len(), "diet plan generated");

    Ok(CallToolResult::success(vec![Content::text(markdown)]))
}
