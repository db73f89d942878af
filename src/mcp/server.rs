use std::path::Path;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::{
    config::load_config,
    core::{Patch, report},
    issues::Report,
    project::ApplyOptions,
};

use super::helpers::{
    apply_result, completeness_item, completeness_summary, find_locale, json_result, load_project,
};
use super::types::{
    ApplyPatchParams, CompletenessItem, CompletenessScanResult, ConfigDto, ConfigValues,
    GetConfigParams, GetLocalesParams, LocaleInfo, LocalesResult, Pagination,
    ScanCompletenessParams,
};

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 200;

#[derive(Clone)]
pub struct LoctreeMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for LoctreeMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl LoctreeMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the current loctree configuration
    #[tool(description = "Get the current loctree configuration.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path).map_err(|e| {
            McpError::internal_error(format!("Failed to load config: {:#}", e), None)
        })?;

        json_result(&ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        })
    }

    /// Get available locales and their key counts
    #[tool(
        description = "Get available locale files, their paths and leaf key counts. Files that fail to parse are listed with an error."
    )]
    pub async fn get_locales(
        &self,
        params: Parameters<GetLocalesParams>,
    ) -> Result<CallToolResult, McpError> {
        let project = load_project(&params.0.project_root_path)?;

        let mut locales = Vec::new();
        for locale in &project.locales {
            let loaded = project.load_locale(locale).map_err(|e| {
                McpError::internal_error(format!("Failed to read locale: {:#}", e), None)
            })?;
            let (key_count, error) = match loaded {
                Ok(document) => (Some(document.tree.leaf_count()), None),
                Err(finding) => (None, Some(finding.message())),
            };
            locales.push(LocaleInfo {
                locale: locale.name.clone(),
                file_path: project.relative(&locale.path).to_string_lossy().to_string(),
                is_reference: locale.name == project.config.reference_locale,
                key_count,
                error,
            });
        }

        json_result(&LocalesResult {
            locales_root: project
                .relative(&project.locales_root)
                .to_string_lossy()
                .to_string(),
            reference_locale: project.config.reference_locale.clone(),
            locales,
        })
    }

    /// Classify one locale against the reference locale
    #[tool(
        description = "Compare one locale against the reference locale. Returns completeness statistics and a paginated list of keys that are missing, empty, placeholders or of the wrong type, most urgent first."
    )]
    pub async fn scan_completeness(
        &self,
        params: Parameters<ScanCompletenessParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let limit = params
            .limit
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);

        let project = load_project(&params.project_root_path)?;
        let target = find_locale(&project, &params.locale)?;
        let reference = project
            .reference()
            .map_err(|e| McpError::invalid_params(format!("{:#}", e), None))?;

        let reference_doc = project
            .load_locale_strict(&reference)
            .map_err(|e| McpError::internal_error(format!("{:#}", e), None))?;
        let target_doc = project
            .load_locale_strict(&target)
            .map_err(|e| McpError::internal_error(format!("{:#}", e), None))?;

        let report = report(project.classify(&reference_doc, &target_doc));
        let pending = report.pending();
        let total_pending = pending.len();
        let items: Vec<CompletenessItem> = pending
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(completeness_item)
            .collect();
        let has_more = offset + items.len() < total_pending;

        json_result(&CompletenessScanResult {
            locale: target.name,
            reference_locale: reference.name,
            summary: completeness_summary(&report),
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    /// Merge entries into a locale file
    #[tool(
        description = "Merge translation entries into a locale file without dropping existing keys. Dry run unless apply is true. Entries that would replace a value with a mapping (or a mapping with a value) block the write unless allowOverrides is true. The previous file is backed up before writing."
    )]
    pub async fn apply_patch(
        &self,
        params: Parameters<ApplyPatchParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let patch = Patch::from_json(&params.entries)
            .map_err(|e| McpError::invalid_params(format!("Invalid entries: {}", e), None))?;
        if patch.is_empty() {
            return Err(McpError::invalid_params("entries cannot be empty", None));
        }

        let project = load_project(&params.project_root_path)?;
        let locale = find_locale(&project, &params.locale)?;

        let options = ApplyOptions {
            apply: params.apply.unwrap_or(false),
            allow_overrides: params.allow_overrides.unwrap_or(false),
        };
        let applied = project
            .apply_patch(&locale, &patch, options)
            .map_err(|e| McpError::internal_error(format!("{:#}", e), None))?;

        json_result(&apply_result(&project, &applied))
    }
}

#[tool_handler]
impl ServerHandler for LoctreeMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Loctree MCP helps AI agents keep JS/TS locale files in sync with a reference locale.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. get_locales - Get locale files and their key counts\n\
                 3. scan_completeness - Compare a locale against the reference (paginated)\n\
                 4. apply_patch - Merge translated entries into a locale file\n\n\
                 Recommended Workflow:\n\
                 1. Use get_locales to find the reference and target locales\n\
                 2. Use scan_completeness on a target locale; critical keys come first\n\
                 3. Translate the listed reference values\n\
                 4. Call apply_patch without apply to preview, then with apply=true to write\n\n\
                 IMPORTANT: Do not set allowOverrides unless the user asked to restructure keys.\n\
                 An override replaces existing content instead of adding to it."
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
            let service = LoctreeMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
