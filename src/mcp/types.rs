use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{Diagnostic, TranslationUnit};

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path to the project root
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractUpdatesParams {
    /// Absolute path to the project root
    pub project_root_path: String,
    /// Maximum number of units to return (default 20, max 100)
    pub limit: Option<u32>,
    /// Number of units to skip
    pub offset: Option<u32>,
}

// ============================================================
// Config Types (get_config)
// ============================================================

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub ignores: Vec<String>,
    pub includes: Vec<String>,
    pub source_root: String,
    pub ignore_test_files: bool,
    pub ignore_additional_data: bool,
    pub ignore_dynamic_content: bool,
    pub ignore_invalid_icu: bool,
    pub extra_modules: Vec<String>,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            ignores: c.ignores,
            includes: c.includes,
            source_root: c.source_root,
            ignore_test_files: c.ignore_test_files,
            ignore_additional_data: c.ignore_additional_data,
            ignore_dynamic_content: c.ignore_dynamic_content,
            ignore_invalid_icu: c.ignore_invalid_icu,
            extra_modules: c.extra_modules,
        }
    }
}

// ============================================================
// Extraction Types (extract_updates)
// ============================================================

/// One page of extracted units plus every diagnostic of the run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractUpdatesResult {
    pub files_scanned: usize,
    pub total_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub items: Vec<TranslationUnit>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
