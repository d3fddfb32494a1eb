//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::{
    CacheLookupParams, DeeplinkParseParams, HttpGetParams, SharedClient, deeplink_parse_impl, http_get_impl,
    lookup_impl,
};

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

/// The main MCP server handler for eyerise.
#[derive(Clone)]
pub struct EyeriseServer {
    tool_router: ToolRouter<Self>,
    client: Arc<SharedClient>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl EyeriseServer {
    /// Create a new server handler around a cached fetch client.
    pub fn new(client: Arc<SharedClient>) -> Self {
        Self { tool_router: Self::tool_router(), client }
    }

    /// Decompose a deep link into scheme, host, path and ordered query parameters.
    #[tool(description = "Decompose a deep link URL into scheme, host, path and ordered query parameters.")]
    async fn deeplink_parse(&self, params: Parameters<DeeplinkParseParams>) -> Result<CallToolResult, McpError> {
        deeplink_parse_impl(params.0)
    }

    /// Fetch a URL through the expiring response cache.
    #[tool(description = "HTTP GET a URL through the expiring response cache. Reports whether the response was cached.")]
    async fn http_get(&self, params: Parameters<HttpGetParams>) -> Result<CallToolResult, McpError> {
        http_get_impl(&self.client, params.0).await
    }

    /// Check whether a fresh cached response exists for a URL.
    #[tool(description = "Look up the cached response for a GET of the URL. Expired entries are evicted.")]
    async fn cache_lookup(&self, params: Parameters<CacheLookupParams>) -> Result<CallToolResult, McpError> {
        lookup_impl(self.client.cache(), params.0).await
    }
}

impl ServerHandler for EyeriseServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "eyerise".into(),
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
