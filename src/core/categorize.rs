//! Domain category and priority tier of a key, derived from its first segment.

use std::fmt;

use serde::Serialize;

use super::key_path::KeyPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Navigation,
    Forms,
    MedicalContent,
    Errors,
    Accessibility,
    Account,
    Content,
    Legal,
    Meta,
    Common,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

/// First-segment prefixes (lowercase) and the category they map to.
const CATEGORY_TABLE: &[(&str, Category)] = &[
    ("nav", Category::Navigation),
    ("navigation", Category::Navigation),
    ("menu", Category::Navigation),
    ("header", Category::Navigation),
    ("footer", Category::Navigation),
    ("breadcrumbs", Category::Navigation),
    ("form", Category::Forms),
    ("forms", Category::Forms),
    ("validation", Category::Forms),
    ("buttons", Category::Forms),
    ("actions", Category::Forms),
    ("medical", Category::MedicalContent),
    ("conditions", Category::MedicalContent),
    ("treatments", Category::MedicalContent),
    ("symptoms", Category::MedicalContent),
    ("health", Category::MedicalContent),
    ("clinic", Category::MedicalContent),
    ("error", Category::Errors),
    ("errors", Category::Errors),
    ("alerts", Category::Errors),
    ("notifications", Category::Errors),
    ("a11y", Category::Accessibility),
    ("accessibility", Category::Accessibility),
    ("aria", Category::Accessibility),
    ("auth", Category::Account),
    ("login", Category::Account),
    ("account", Category::Account),
    ("profile", Category::Account),
    ("home", Category::Content),
    ("about", Category::Content),
    ("pages", Category::Content),
    ("content", Category::Content),
    ("blog", Category::Content),
    ("faq", Category::Content),
    ("legal", Category::Legal),
    ("privacy", Category::Legal),
    ("terms", Category::Legal),
    ("cookies", Category::Legal),
    ("meta", Category::Meta),
    ("seo", Category::Meta),
    ("common", Category::Common),
    ("general", Category::Common),
    ("shared", Category::Common),
];

const PRIORITY_TABLE: &[(Category, Priority)] = &[
    (Category::Navigation, Priority::Critical),
    (Category::Errors, Priority::Critical),
    (Category::MedicalContent, Priority::Critical),
    (Category::Forms, Priority::High),
    (Category::Accessibility, Priority::High),
    (Category::Account, Priority::High),
    (Category::Content, Priority::Medium),
    (Category::Common, Priority::Medium),
    (Category::Legal, Priority::Medium),
    (Category::Meta, Priority::Low),
    (Category::Other, Priority::Low),
];

impl Category {
    /// Every category, in report order.
    pub const ALL: [Category; 11] = [
        Category::Navigation,
        Category::Forms,
        Category::MedicalContent,
        Category::Errors,
        Category::Accessibility,
        Category::Account,
        Category::Content,
        Category::Legal,
        Category::Meta,
        Category::Common,
        Category::Other,
    ];

    pub fn from_segment(segment: &str) -> Self {
        let lowered = segment.to_lowercase();
        CATEGORY_TABLE
            .iter()
            .find(|(prefix, _)| *prefix == lowered)
            .map(|(_, category)| *category)
            .unwrap_or(Category::Other)
    }

    pub fn priority(self) -> Priority {
        PRIORITY_TABLE
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, priority)| *priority)
            .unwrap_or(Priority::Low)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Navigation => "navigation",
            Category::Forms => "forms",
            Category::MedicalContent => "medical-content",
            Category::Errors => "errors",
            Category::Accessibility => "accessibility",
            Category::Account => "account",
            Category::Content => "content",
            Category::Legal => "legal",
            Category::Meta => "meta",
            Category::Common => "common",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Critical => write!(f, "critical"),
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Category and priority of a key path.
pub fn categorize(path: &KeyPath) -> (Category, Priority) {
    let category = path
        .first()
        .map(Category::from_segment)
        .unwrap_or(Category::Other);
    (category, category.priority())
}
