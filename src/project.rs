//! A loaded project: configuration, discovered locales and the pipelines the
//! CLI and the MCP server share.

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    config::{Config, load_config},
    core::{
        ArtifactError, ClassificationResult, CompletenessReport, LocaleDocument, MergeOutcome,
        Node, Patch, PlaceholderMarkers, Scalar, Status, WriteReceipt, diff, merge, report,
        store,
    },
    issues::{Finding, IncompleteKey, LocaleParseError, OverrideConflict},
    locales::{LocaleFile, discover_locales, find_locale},
};

/// Values that override the config file.
#[derive(Debug, Clone, Default)]
pub struct ProjectOverrides {
    pub locales_root: Option<PathBuf>,
    pub reference_locale: Option<String>,
}

pub struct Project {
    /// Directory relative paths resolve against.
    pub root: PathBuf,
    pub config: Config,
    pub from_file: bool,
    pub locales_root: PathBuf,
    pub locales: Vec<LocaleFile>,
    pub markers: PlaceholderMarkers,
}

/// Completeness of one target locale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleCheck {
    pub locale: String,
    pub file: PathBuf,
    pub report: CompletenessReport,
}

impl LocaleCheck {
    pub fn findings(&self) -> Vec<Finding> {
        self.report
            .results
            .iter()
            .filter(|r| !r.status.is_complete())
            .map(|result| {
                Finding::IncompleteKey(IncompleteKey {
                    locale: self.locale.clone(),
                    file: self.file.clone(),
                    result: result.clone(),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Write the result; otherwise only compute it.
    pub apply: bool,
    pub allow_overrides: bool,
}

/// What applying a patch to a locale did (or would do).
#[derive(Debug)]
pub struct ApplyOutcome {
    pub locale: String,
    pub file: PathBuf,
    pub outcome: MergeOutcome,
    /// Set when the file was written.
    pub written: Option<WriteReceipt>,
    /// True when `--apply` was requested but overrides prevented the write.
    pub blocked: bool,
    pub allow_overrides: bool,
}

impl ApplyOutcome {
    pub fn findings(&self) -> Vec<Finding> {
        self.outcome
            .overrides
            .iter()
            .map(|conflict| {
                Finding::OverrideConflict(OverrideConflict {
                    locale: self.locale.clone(),
                    file: self.file.clone(),
                    conflict: conflict.clone(),
                    allowed: self.allow_overrides,
                })
            })
            .collect()
    }
}

/// Drop `.` components so joined paths print cleanly.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl Project {
    pub fn load(start_dir: &Path, overrides: &ProjectOverrides) -> Result<Self> {
        let loaded = load_config(start_dir)?;
        let mut config = loaded.config;
        if let Some(reference) = &overrides.reference_locale {
            config.reference_locale = reference.clone();
        }

        let locales_root = match &overrides.locales_root {
            Some(path) => normalize(&start_dir.join(path)),
            None => normalize(&loaded.base_dir.join(&config.locales_root)),
        };

        let locales = discover_locales(&locales_root, &config)?;
        let markers = config.markers()?;
        tracing::debug!(
            root = %locales_root.display(),
            locales = locales.len(),
            "discovered locales"
        );

        Ok(Self {
            root: loaded.base_dir,
            config,
            from_file: loaded.from_file,
            locales_root,
            locales,
            markers,
        })
    }

    pub fn reference(&self) -> Result<LocaleFile> {
        find_locale(&self.locales, &self.config.reference_locale)
            .context("Reference locale is not available (set 'referenceLocale' or --reference-locale)")
    }

    pub fn locale(&self, name: &str) -> Result<LocaleFile> {
        find_locale(&self.locales, name)
    }

    /// The named locales, or every locale except the reference.
    pub fn targets(&self, names: &[String]) -> Result<Vec<LocaleFile>> {
        if names.is_empty() {
            return Ok(self
                .locales
                .iter()
                .filter(|l| l.name != self.config.reference_locale)
                .cloned()
                .collect());
        }
        names.iter().map(|name| self.locale(name)).collect()
    }

    /// Path for display, relative to the project root when possible.
    pub fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }

    pub fn backup_dir(&self) -> Option<PathBuf> {
        self.config
            .backup_dir
            .as_ref()
            .map(|dir| normalize(&self.root.join(dir)))
    }

    /// Load a locale. A parse failure becomes a finding; I/O errors are
    /// returned as errors.
    pub fn load_locale(&self, locale: &LocaleFile) -> Result<Result<LocaleDocument, Finding>> {
        match store::load(&locale.path) {
            Ok(document) => Ok(Ok(document)),
            Err(ArtifactError::Parse { path, source }) => {
                let text = fs::read_to_string(&path).unwrap_or_default();
                Ok(Err(Finding::LocaleParseError(LocaleParseError::new(
                    &locale.name,
                    self.relative(&path),
                    source,
                    &text,
                ))))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load a locale that must parse.
    pub fn load_locale_strict(&self, locale: &LocaleFile) -> Result<LocaleDocument> {
        store::load(&locale.path).with_context(|| format!("Failed to load locale '{}'", locale.name))
    }

    pub fn classify(
        &self,
        reference: &LocaleDocument,
        target: &LocaleDocument,
    ) -> Vec<ClassificationResult> {
        diff(&reference.tree, &target.tree, &self.markers)
    }

    /// Check several targets in parallel. Each target is independent.
    pub fn check_locales(
        &self,
        reference: &LocaleDocument,
        targets: &[LocaleFile],
    ) -> Result<Vec<Result<LocaleCheck, Finding>>> {
        targets
            .par_iter()
            .map(|target| {
                let document = match self.load_locale(target)? {
                    Ok(document) => document,
                    Err(finding) => return Ok(Err(finding)),
                };
                let report = report(self.classify(reference, &document));
                tracing::debug!(
                    locale = %target.name,
                    keys = report.total,
                    incomplete = report.incomplete(),
                    "classified locale"
                );
                Ok(Ok(LocaleCheck {
                    locale: target.name.clone(),
                    file: self.relative(&target.path),
                    report,
                }))
            })
            .collect()
    }

    /// Patch that adds every missing key, seeded from the reference value.
    pub fn fill_patch(&self, results: &[ClassificationResult]) -> Patch {
        let mut patch = Patch::new();
        for result in results.iter().filter(|r| r.status == Status::Missing) {
            patch.push(result.path.clone(), self.fill_node(&result.source_value));
        }
        patch
    }

    fn fill_node(&self, source: &Node) -> Node {
        let fill = |scalar: &Scalar| match scalar {
            Scalar::String(s) => Scalar::String(self.config.fill_value(s)),
            other => other.clone(),
        };
        match source {
            Node::Scalar(scalar) => Node::Scalar(fill(scalar)),
            Node::List(items) => Node::List(items.iter().map(fill).collect()),
            Node::Map(tree) => Node::Map(tree.clone()),
        }
    }

    /// Merge `patch` into a locale and write it when asked to.
    ///
    /// Overrides block the write unless `allow_overrides` is set.
    pub fn apply_patch(
        &self,
        locale: &LocaleFile,
        patch: &Patch,
        options: ApplyOptions,
    ) -> Result<ApplyOutcome> {
        let document = self.load_locale_strict(locale)?;
        let outcome = merge(&document.tree, patch);

        let blocked = options.apply && outcome.has_overrides() && !options.allow_overrides;
        let written = if options.apply && !blocked && !outcome.is_noop() {
            let updated = LocaleDocument {
                tree: outcome.tree.clone(),
                export: document.export.clone(),
            };
            let backup_dir = self.backup_dir();
            let receipt = store::save(&locale.path, &updated, backup_dir.as_deref())
                .with_context(|| format!("Failed to write locale '{}'", locale.name))?;
            Some(receipt)
        } else {
            None
        };

        Ok(ApplyOutcome {
            locale: locale.name.clone(),
            file: self.relative(&locale.path),
            outcome,
            written,
            blocked,
            allow_overrides: options.allow_overrides,
        })
    }
}
