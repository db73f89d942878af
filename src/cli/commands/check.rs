use anyhow::Result;

use super::super::args::CheckCommand;
use super::{CheckSummary, CommandResult, CommandSummary, finish, load_project};
use crate::issues::Finding;

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let project = load_project(&cmd.common)?;
    let reference = project.reference()?;
    let reference_doc = project.load_locale_strict(&reference)?;
    let targets = project.targets(&cmd.locales)?;

    let mut checks = Vec::with_capacity(targets.len());
    let mut findings: Vec<Finding> = Vec::new();
    let mut skipped = 0;

    for outcome in project.check_locales(&reference_doc, &targets)? {
        match outcome {
            Ok(check) => {
                findings.extend(check.findings());
                checks.push(check);
            }
            Err(finding) => {
                skipped += 1;
                findings.push(finding);
            }
        }
    }

    Ok(finish(
        CommandSummary::Check(CheckSummary {
            reference: reference.name,
            checks,
            skipped,
            format: cmd.format,
            output: cmd.output,
        }),
        findings,
        true,
    ))
}
