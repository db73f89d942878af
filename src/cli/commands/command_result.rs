use std::path::PathBuf;

use super::super::{args::OutputFormat, exit_status::ExitStatus};
use crate::{
    core::{KeyPath, Patch},
    issues::Finding,
    project::{ApplyOutcome, LocaleCheck},
};

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Keys(KeysSummary),
    Merge(MergeSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    pub reference: String,
    pub checks: Vec<LocaleCheck>,
    /// Locales that could not be parsed.
    pub skipped: usize,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct KeysSummary {
    pub locale: String,
    pub paths: Vec<KeyPath>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeSource {
    /// `merge --patch`
    Patch,
    /// `fill`
    Fill,
}

#[derive(Debug)]
pub struct MergeSummary {
    pub source: MergeSource,
    pub patch: Patch,
    pub applied: ApplyOutcome,
    pub is_apply: bool,
    /// Backup of the previous content, relative to the project root.
    pub backup: Option<PathBuf>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running loctree commands
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Findings to print, in display order.
    pub findings: Vec<Finding>,
    pub exit_status: ExitStatus,
}

/// Build a result. Parse errors always end in [`ExitStatus::Error`]; other
/// findings end in [`ExitStatus::Failure`] when `fail_on_findings` is set.
pub fn finish(
    summary: CommandSummary,
    findings: Vec<Finding>,
    fail_on_findings: bool,
) -> CommandResult {
    let exit_status = if findings.iter().any(Finding::is_parse_error) {
        ExitStatus::Error
    } else if fail_on_findings && !findings.is_empty() {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    };

    CommandResult {
        summary,
        findings,
        exit_status,
    }
}
