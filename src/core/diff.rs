//! Reference-vs-target classification.
//!
//! The reference locale is authoritative: every leaf it has gets exactly one
//! [`ClassificationResult`], keys that only exist in the target are ignored.

use std::fmt;

use regex::RegexSet;
use serde::Serialize;

use super::{
    categorize::{Category, Priority, categorize},
    key_path::KeyPath,
    tree::{LocaleTree, Node},
};

/// Marker patterns used when no configuration overrides them.
pub const DEFAULT_PLACEHOLDER_MARKERS: &[&str] = &[
    r"^\[(?i:todo|translate|translation needed|needs translation|untranslated|missing)\]",
    r"^(?i:todo)\s*:",
    r"^__(?i:missing|untranslated)__$",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Complete,
    Missing,
    Empty,
    Placeholder,
    TypeMismatch,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Complete,
        Status::Missing,
        Status::Empty,
        Status::Placeholder,
        Status::TypeMismatch,
    ];

    pub fn is_complete(self) -> bool {
        self == Status::Complete
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Complete => write!(f, "complete"),
            Status::Missing => write!(f, "missing"),
            Status::Empty => write!(f, "empty"),
            Status::Placeholder => write!(f, "placeholder"),
            Status::TypeMismatch => write!(f, "type-mismatch"),
        }
    }
}

/// The canonical set of "needs translation" marker patterns.
#[derive(Debug, Clone)]
pub struct PlaceholderMarkers {
    set: RegexSet,
}

impl PlaceholderMarkers {
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            set: RegexSet::new(patterns)?,
        })
    }

    /// A marker set that matches nothing.
    pub fn none() -> Self {
        Self {
            set: RegexSet::empty(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        self.set.patterns()
    }

    pub fn matches(&self, value: &str) -> bool {
        self.set.is_match(value)
    }
}

impl Default for PlaceholderMarkers {
    fn default() -> Self {
        match Self::new(DEFAULT_PLACEHOLDER_MARKERS) {
            Ok(markers) => markers,
            Err(_) => Self::none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub path: KeyPath,
    pub source_value: Node,
    pub target_value: Option<Node>,
    pub status: Status,
    pub category: Category,
    pub priority: Priority,
}

/// Classify a target value against the reference leaf it should translate.
///
/// Order matters: a kind mismatch is decided before the empty and placeholder
/// checks, which only apply to strings (and, for emptiness, lists).
pub fn classify(source: &Node, target: Option<&Node>, markers: &PlaceholderMarkers) -> Status {
    let Some(target) = target else {
        return Status::Missing;
    };
    if source.kind() != target.kind() {
        return Status::TypeMismatch;
    }
    match target {
        Node::Scalar(scalar) => match scalar.as_str() {
            Some("") => Status::Empty,
            Some(text) if markers.matches(text) => Status::Placeholder,
            _ => Status::Complete,
        },
        Node::List(items) if items.is_empty() => Status::Empty,
        _ => Status::Complete,
    }
}

/// One result per reference leaf, in depth-first insertion order.
pub fn diff(
    reference: &LocaleTree,
    target: &LocaleTree,
    markers: &PlaceholderMarkers,
) -> Vec<ClassificationResult> {
    reference
        .leaves()
        .map(|(path, source)| {
            let target_value = target.resolve(&path);
            let status = classify(source, target_value, markers);
            let (category, priority) = categorize(&path);
            ClassificationResult {
                path,
                source_value: source.clone(),
                target_value: target_value.cloned(),
                status,
                category,
                priority,
            }
        })
        .collect()
}
