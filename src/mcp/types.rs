use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project root (where .loctreerc.json lives or would live)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetLocalesParams {
    /// Absolute path of the project root
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanCompletenessParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// Target locale to compare against the reference locale (e.g., "es")
    pub locale: String,
    /// Number of items to skip (default 0)
    pub offset: Option<u32>,
    /// Maximum number of items to return (default 50, max 200)
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyPatchParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// Locale file to merge into (e.g., "es")
    pub locale: String,
    /// Either an object keyed by dotted key paths (values may be nested objects),
    /// or an array of [keyPath, value] pairs
    pub entries: serde_json::Value,
    /// Write the merged file (default false: dry run)
    pub apply: Option<bool>,
    /// Write even when an entry replaces a scalar or a whole branch (default false)
    pub allow_overrides: Option<bool>,
}

// ============================================================
// Config Types (get_config)
// ============================================================

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
    pub locales_root: String,
    pub reference_locale: String,
    pub extensions: Vec<String>,
    pub ignores: Vec<String>,
    pub placeholder_markers: Vec<String>,
    pub fill_template: String,
    pub backup_dir: Option<String>,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            locales_root: c.locales_root,
            reference_locale: c.reference_locale,
            extensions: c.extensions,
            ignores: c.ignores,
            placeholder_markers: c.placeholder_markers,
            fill_template: c.fill_template,
            backup_dir: c.backup_dir,
        }
    }
}

// ============================================================
// Locales Types (get_locales)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalesResult {
    pub locales_root: String,
    pub reference_locale: String,
    pub locales: Vec<LocaleInfo>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    pub locale: String,
    pub file_path: String,
    pub is_reference: bool,
    /// Number of leaf keys (absent when the file does not parse)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================
// Completeness Types (scan_completeness)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessScanResult {
    pub locale: String,
    pub reference_locale: String,
    pub summary: CompletenessSummary,
    /// Keys that still need work, most urgent first
    pub items: Vec<CompletenessItem>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessSummary {
    pub total: usize,
    pub complete: usize,
    pub missing: usize,
    pub empty: usize,
    pub placeholder: usize,
    pub type_mismatch: usize,
    /// Fraction of complete keys, 0.0 when there are no keys
    pub completion_rate: f64,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessItem {
    pub key: String,
    pub status: String,
    pub category: String,
    pub priority: String,
    pub reference_value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

// ============================================================
// Patch Types (apply_patch)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyPatchResult {
    pub locale: String,
    pub file_path: String,
    /// True if the file was rewritten
    pub written: bool,
    /// True if structural overrides stopped the write
    pub blocked: bool,
    pub added_count: usize,
    pub updated_count: usize,
    pub unchanged_count: usize,
    pub changes: Vec<KeyActionDetail>,
    pub overrides: Vec<OverrideDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyActionDetail {
    pub key: String,
    pub action: String, // "added", "updated", "unchanged"
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverrideDetail {
    /// Path in the file whose content was replaced
    pub key: String,
    /// Patch entry that caused the replacement
    pub patch_key: String,
    pub kind: String,
    pub message: String,
}

// ============================================================
// Common Types
// ============================================================

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
