//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use asana_core::{DietProfile, MediaResolver, TextGenerator};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

use crate::tools::diet_plan::diet_plan_impl;
use crate::tools::media_lookup::{MediaLookupParams, media_lookup_impl};
use crate::tools::pose_info::{PoseInfoParams, pose_info_impl};

/// The main MCP server handler for asana.
///
/// Holds the process-wide media resolver; clones share its cache.
#[derive(Clone)]
pub struct AsanaServer {
    tool_router: ToolRouter<Self>,
    resolver: Arc<MediaResolver>,
    generator: Arc<dyn TextGenerator>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl AsanaServer {
    /// Create a new server handler.
    pub fn new(resolver: Arc<MediaResolver>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { tool_router: Self::tool_router(), resolver, generator }
    }

    /// Resolve a pose name to an image or video URL.
    #[tool(
        description = "Find a representative image or video URL for a yoga pose. Returns JSON with `url` and `found`; lookups that fail return found=false."
    )]
    async fn media_lookup(&self, params: Parameters<MediaLookupParams>) -> Result<CallToolResult, McpError> {
        media_lookup_impl(&self.resolver, params.0).await
    }

    /// Generate markdown insights for an asana.
    #[tool(description = "Describe a yoga pose: key benefits, step-by-step instructions and precautions as Markdown.")]
    async fn pose_info(&self, params: Parameters<PoseInfoParams>) -> Result<CallToolResult, McpError> {
        pose_info_impl(self.generator.as_ref(), params.0).await
    }

    /// Generate a personalised diet plan.
    #[tool(description = "Create a personalised, repeatable diet plan from age, gender, weight, height and goal as Markdown.")]
    async fn diet_plan(&self, params: Parameters<DietProfile>) -> Result<CallToolResult, McpError> {
        diet_plan_impl(self.generator.as_ref(), params.0).await
    }
}

impl ServerHandler for AsanaServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "asana".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
