use std::path::{Path, PathBuf};

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{cli::CommonArgs, config::load_config, core::ExtractContext};

use super::types::{
    ConfigDto, ConfigValues, ExtractUpdatesParams, ExtractUpdatesResult, GetConfigParams,
    Pagination,
};

#[derive(Clone)]
pub struct LexidMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for LexidMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl LexidMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Extract translation units from a project
    #[tool(
        description = "Extract translatable content (<T> scopes and translator calls) into hashed translation units. Returns a paginated list of units plus all errors and warnings."
    )]
    pub async fn extract_updates(
        &self,
        params: Parameters<ExtractUpdatesParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params.0.limit.map(|v| v as usize).unwrap_or(20).min(100);
        let offset = params.0.offset.map(|v| v as usize).unwrap_or(0);

        let common = CommonArgs {
            source_root: Some(PathBuf::from(&params.0.project_root_path)),
            ..Default::default()
        };
        let ctx = ExtractContext::new(&common)
            .map_err(|e| McpError::internal_error(format!("Failed to initialize: {}", e), None))?;
        let output = ctx.output();

        let total_count = output.updates.len();
        let items: Vec<_> = output
            .updates
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        let has_more = offset + items.len() < total_count;

        let result = ExtractUpdatesResult {
            files_scanned: ctx.files.len(),
            total_count,
            error_count: output.errors.len(),
            warning_count: output.warnings.len(),
            errors: output.errors.clone(),
            warnings: output.warnings.iter().cloned().collect(),
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        };

        to_json_result(&result)
    }

    /// Get the current lexid configuration
    #[tool(description = "Get the current lexid configuration.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        let config_dto = ConfigDto {
            from_file: result.from_file(),
            config: ConfigValues::from(result.config),
        };

        to_json_result(&config_dto)
    }
}

fn to_json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_handler]
impl ServerHandler for LexidMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Lexid MCP extracts translatable content from JSX/TSX projects.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. extract_updates - Extract translation units with errors and warnings (paginated)\n\n\
                 Units are content-addressed: the same content, context and id always\n\
                 produce the same hash. Fix reported errors before relying on the unit list;\n\
                 a translation scope with errors produces no unit."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = LexidMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
