//! Findings reported by the CLI and the MCP server.
//!
//! Each finding type carries what a front end needs to display it:
//! - where it is (file, optionally line and column)
//! - a one-line message and a label
//! - optional note and hint lines

use std::{
    fmt,
    path::{Path, PathBuf},
};

use enum_dispatch::enum_dispatch;

use crate::core::{ClassificationResult, OverrideKind, ParseError, Status, StructuralOverride};

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Where a finding points.
pub enum ReportLocation<'a> {
    /// A position inside a file, with the offending line for context.
    Span {
        path: &'a Path,
        line: usize,
        column: usize,
        source_line: Option<&'a str>,
    },
    /// File-level only.
    File { path: &'a Path },
}

/// A key of a target locale that is not complete.
#[derive(Debug, Clone, PartialEq)]
pub struct IncompleteKey {
    pub locale: String,
    pub file: PathBuf,
    pub result: ClassificationResult,
}

/// A structural override a merge would perform.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideConflict {
    pub locale: String,
    pub file: PathBuf,
    pub conflict: StructuralOverride,
    /// True when the override was allowed and written.
    pub allowed: bool,
}

/// A locale module that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleParseError {
    pub locale: String,
    pub file: PathBuf,
    pub error: ParseError,
    pub source_line: Option<String>,
}

#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message (usually a key path).
    fn message(&self) -> String;

    fn severity(&self) -> Severity;

    /// Short label shown next to the message, e.g. `missing`.
    fn label(&self) -> String;

    /// Text for the `= note:` line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Text for the `= hint:` line.
    fn hint(&self) -> Option<String> {
        None
    }
}

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    IncompleteKey(IncompleteKey),
    OverrideConflict(OverrideConflict),
    LocaleParseError(LocaleParseError),
}

impl Finding {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Finding::LocaleParseError(_))
    }
}

impl Report for IncompleteKey {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.file }
    }

    fn message(&self) -> String {
        self.result.path.to_string()
    }

    fn severity(&self) -> Severity {
        match self.result.status {
            Status::Missing | Status::TypeMismatch => Severity::Error,
            _ => Severity::Warning,
        }
    }

    fn label(&self) -> String {
        self.result.status.to_string()
    }

    fn details(&self) -> Option<String> {
        let mut details = format!(
            "{} ({}), reference: {}",
            self.result.category,
            self.result.priority,
            quote_preview(&self.result.source_value.preview())
        );
        if let Some(target) = &self.result.target_value
            && self.result.status != Status::Empty
        {
            details.push_str(&format!(", {}: {}", self.locale, quote_preview(&target.preview())));
        }
        Some(details)
    }

    fn hint(&self) -> Option<String> {
        match self.result.status {
            Status::TypeMismatch => self.result.target_value.as_ref().map(|target| {
                format!(
                    "reference is a {} but {} has a {}",
                    self.result.source_value.kind(),
                    self.locale,
                    target.kind()
                )
            }),
            _ => None,
        }
    }
}

impl Report for OverrideConflict {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.file }
    }

    fn message(&self) -> String {
        self.conflict.path.to_string()
    }

    fn severity(&self) -> Severity {
        if self.allowed {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    fn label(&self) -> String {
        match self.conflict.kind {
            OverrideKind::ScalarReplaced => "scalar-replaced".to_string(),
            OverrideKind::BranchReplaced => "branch-replaced".to_string(),
        }
    }

    fn details(&self) -> Option<String> {
        Some(self.conflict.to_string())
    }

    fn hint(&self) -> Option<String> {
        (!self.allowed).then(|| "pass --allow-overrides to replace it anyway".to_string())
    }
}

impl Report for LocaleParseError {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Span {
            path: &self.file,
            line: self.error.line,
            column: self.error.column,
            source_line: self.source_line.as_deref(),
        }
    }

    fn message(&self) -> String {
        self.error.message.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn label(&self) -> String {
        "parse-error".to_string()
    }

    fn details(&self) -> Option<String> {
        Some(format!("locale '{}' was skipped", self.locale))
    }
}

impl LocaleParseError {
    /// Build from the source text the error was found in.
    pub fn new(locale: &str, file: PathBuf, error: ParseError, source: &str) -> Self {
        let source_line = source
            .lines()
            .nth(error.line.saturating_sub(1))
            .map(|line| line.to_string());
        Self {
            locale: locale.to_string(),
            file,
            error,
            source_line,
        }
    }
}

const PREVIEW_LIMIT: usize = 60;

fn quote_preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_LIMIT).collect();
    let head = head.replace('\n', "\\n");
    if chars.next().is_some() {
        format!("\"{}…\"", head)
    } else {
        format!("\"{}\"", head)
    }
}
