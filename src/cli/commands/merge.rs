use std::fs;

use anyhow::{Context, Result};

use super::super::args::{FillCommand, MergeCommand};
use super::{CommandResult, CommandSummary, MergeSource, MergeSummary, finish, load_project};
use crate::{
    core::Patch,
    locales::LocaleFile,
    project::{ApplyOptions, Project},
};

pub fn merge(cmd: MergeCommand) -> Result<CommandResult> {
    let project = load_project(&cmd.common)?;
    let locale = project.locale(&cmd.locale)?;

    let content = fs::read_to_string(&cmd.patch)
        .with_context(|| format!("Failed to read patch file: {}", cmd.patch.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse patch file: {}", cmd.patch.display()))?;
    let patch = Patch::from_json(&value)
        .with_context(|| format!("Invalid patch file: {}", cmd.patch.display()))?;

    run(
        &project,
        &locale,
        patch,
        MergeSource::Patch,
        ApplyOptions {
            apply: cmd.apply,
            allow_overrides: cmd.allow_overrides,
        },
    )
}

pub fn fill(cmd: FillCommand) -> Result<CommandResult> {
    let project = load_project(&cmd.common)?;
    let reference = project.reference()?;
    let locale = project.locale(&cmd.locale)?;
    if reference.name == locale.name {
        anyhow::bail!("Cannot fill the reference locale '{}'", locale.name);
    }

    let reference_doc = project.load_locale_strict(&reference)?;
    let target_doc = project.load_locale_strict(&locale)?;
    let patch = project.fill_patch(&project.classify(&reference_doc, &target_doc));

    run(
        &project,
        &locale,
        patch,
        MergeSource::Fill,
        ApplyOptions {
            apply: cmd.apply,
            allow_overrides: false,
        },
    )
}

fn run(
    project: &Project,
    locale: &LocaleFile,
    patch: Patch,
    source: MergeSource,
    options: ApplyOptions,
) -> Result<CommandResult> {
    let applied = project.apply_patch(locale, &patch, options)?;
    let findings = applied.findings();
    let blocked = applied.blocked;
    let backup = applied
        .written
        .as_ref()
        .and_then(|receipt| receipt.backup.as_deref())
        .map(|path| project.relative(path));

    Ok(finish(
        CommandSummary::Merge(MergeSummary {
            source,
            patch,
            applied,
            is_apply: options.apply,
            backup,
        }),
        findings,
        blocked,
    ))
}
