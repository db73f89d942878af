//! Helper functions for MCP server operations.

use std::path::Path;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::{
    core::{ChangeKind, ClassificationResult, CompletenessReport, OverrideKind, Status},
    locales::{LocaleFile, is_valid_locale_name},
    project::{ApplyOutcome, Project, ProjectOverrides},
};

use super::types::{
    ApplyPatchResult, CompletenessItem, CompletenessSummary, KeyActionDetail, OverrideDetail,
};

/// Validate a locale name before it is used to look up a file.
///
/// Locale names must start with a letter and contain only ASCII letters,
/// digits, hyphens and underscores, so they can never address a path
/// outside the locales root.
pub fn validate_locale_name(locale: &str) -> Result<(), String> {
    if locale.is_empty() {
        return Err("Locale name cannot be empty".to_string());
    }
    if !is_valid_locale_name(locale) {
        return Err(
            "Locale name must start with a letter and contain only letters, numbers, hyphens, and underscores"
                .to_string(),
        );
    }
    Ok(())
}

pub fn load_project(root: &str) -> Result<Project, McpError> {
    Project::load(Path::new(root), &ProjectOverrides::default())
        .map_err(|e| McpError::internal_error(format!("Failed to load project: {:#}", e), None))
}

/// Look up a validated locale in the project.
pub fn find_locale(project: &Project, locale: &str) -> Result<LocaleFile, McpError> {
    validate_locale_name(locale).map_err(|msg| McpError::invalid_params(msg, None))?;
    project
        .locale(locale)
        .map_err(|e| McpError::invalid_params(format!("{:#}", e), None))
}

pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

fn to_value<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

pub fn completeness_summary(report: &CompletenessReport) -> CompletenessSummary {
    CompletenessSummary {
        total: report.total,
        complete: report.count(Status::Complete),
        missing: report.count(Status::Missing),
        empty: report.count(Status::Empty),
        placeholder: report.count(Status::Placeholder),
        type_mismatch: report.count(Status::TypeMismatch),
        completion_rate: report.completion_rate,
    }
}

pub fn completeness_item(result: &ClassificationResult) -> CompletenessItem {
    CompletenessItem {
        key: result.path.to_string(),
        status: result.status.to_string(),
        category: result.category.to_string(),
        priority: result.priority.to_string(),
        reference_value: to_value(&result.source_value),
        value: result.target_value.as_ref().map(to_value),
    }
}

pub fn apply_result(project: &Project, applied: &ApplyOutcome) -> ApplyPatchResult {
    let outcome = &applied.outcome;
    ApplyPatchResult {
        locale: applied.locale.clone(),
        file_path: applied.file.to_string_lossy().to_string(),
        written: applied.written.is_some(),
        blocked: applied.blocked,
        added_count: outcome.count(ChangeKind::Added),
        updated_count: outcome.count(ChangeKind::Updated),
        unchanged_count: outcome.count(ChangeKind::Unchanged),
        changes: outcome
            .changes
            .iter()
            .map(|change| KeyActionDetail {
                key: change.path.to_string(),
                action: change.kind.as_str().to_string(),
            })
            .collect(),
        overrides: outcome
            .overrides
            .iter()
            .map(|o| OverrideDetail {
                key: o.path.to_string(),
                patch_key: o.patch_path.to_string(),
                kind: match o.kind {
                    OverrideKind::ScalarReplaced => "scalarReplaced".to_string(),
                    OverrideKind::BranchReplaced => "branchReplaced".to_string(),
                },
                message: o.to_string(),
            })
            .collect(),
        backup_path: applied
            .written
            .as_ref()
            .and_then(|receipt| receipt.backup.as_deref())
            .map(|backup| project.relative(backup).to_string_lossy().to_string()),
    }
}
