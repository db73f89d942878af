//! Locale file discovery under the configured locales root.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use walkdir::WalkDir;

use crate::config::Config;

/// A locale module found on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocaleFile {
    /// File stem, e.g. `"zh-CN"` for `zh-CN.ts`.
    pub name: String,
    pub path: PathBuf,
}

/// Locale name of a path.
///
/// - "en.ts" -> Some("en")
/// - "zh-CN.mjs" -> Some("zh-CN")
/// - "en.d.ts" -> None
pub fn locale_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| is_valid_locale_name(s))
        .map(|s| s.to_string())
}

/// ASCII letters, digits, `-` and `_`, starting with a letter.
pub fn is_valid_locale_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Every locale module directly inside `root`, sorted by name.
pub fn discover_locales(root: &Path, config: &Config) -> Result<Vec<LocaleFile>> {
    if !root.exists() {
        bail!(
            "Locales directory '{}' does not exist.\n\
             Hint: Check your .loctreerc.json 'localesRoot' setting.",
            root.display()
        );
    }
    if !root.is_dir() {
        bail!("'{}' is not a directory.", root.display());
    }

    let ignores = config.ignore_patterns()?;
    let mut locales = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy();

        if ignores.iter().any(|p| p.matches(&file_name)) {
            tracing::debug!(file = %file_name, "ignored locale file");
            continue;
        }

        let has_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| config.extensions.iter().any(|e| e == ext));

        if has_extension && let Some(name) = locale_name(path) {
            locales.push(LocaleFile {
                name,
                path: path.to_path_buf(),
            });
        }
    }

    locales.sort();
    if let Some(pair) = locales.windows(2).find(|pair| pair[0].name == pair[1].name) {
        bail!(
            "Locale '{}' is defined twice: {} and {}",
            pair[0].name,
            pair[0].path.display(),
            pair[1].path.display()
        );
    }
    Ok(locales)
}

/// Find one locale by name.
pub fn find_locale(locales: &[LocaleFile], name: &str) -> Result<LocaleFile> {
    match locales.iter().find(|l| l.name == name) {
        Some(locale) => Ok(locale.clone()),
        None => {
            let available: Vec<&str> = locales.iter().map(|l| l.name.as_str()).collect();
            bail!(
                "Locale '{}' not found. Available locales: {}",
                name,
                if available.is_empty() {
                    "(none)".to_string()
                } else {
                    available.join(", ")
                }
            )
        }
    }
}
