//! Report formatting and printing utilities.
//!
//! Findings are printed in cargo style; summaries as small aligned tables.
//! Separate from the engine so loctree can be used as a library.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::OutputFormat,
    commands::{
        CheckSummary, CommandResult, CommandSummary, InitSummary, KeysSummary, MergeSource,
        MergeSummary,
    },
};
use crate::{
    config::CONFIG_FILE_NAME,
    core::{ChangeKind, Status},
    issues::{Finding, Report, ReportLocation, Severity},
    project::LocaleCheck,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) -> Result<()> {
    let stdout = &mut io::stdout().lock();
    match &result.summary {
        CommandSummary::Check(summary) => print_check_to(summary, &result.findings, verbose, stdout),
        CommandSummary::Keys(summary) => {
            print_keys_to(summary, stdout);
            Ok(())
        }
        CommandSummary::Merge(summary) => {
            print_merge_to(summary, &result.findings, stdout);
            Ok(())
        }
        CommandSummary::Init(summary) => {
            print_init(summary);
            Ok(())
        }
    }
}

// ============================================================
// Findings
// ============================================================

/// Print findings in cargo-style format.
pub fn print_findings_to<W: Write>(findings: &[Finding], writer: &mut W) {
    let max_line_width = findings
        .iter()
        .filter_map(|f| match f.location() {
            ReportLocation::Span { line, .. } => Some(line.to_string().len()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .unwrap_or(1)
        .max(2);

    for finding in findings {
        print_finding(finding, writer, max_line_width);
    }
}

fn print_finding<W: Write>(finding: &Finding, writer: &mut W, max_line_width: usize) {
    let severity = finding.severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        finding.message(),
        finding.label().dimmed().cyan()
    );

    match finding.location() {
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path.display());
        }
        ReportLocation::Span {
            path,
            line,
            column,
            source_line,
        } => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                path.display(),
                line,
                column
            );
            if let Some(source_line) = source_line {
                print_source_line(writer, line, column, source_line, severity, max_line_width);
            }
        }
    }

    if let Some(details) = finding.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = finding.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_source_line<W: Write>(
    writer: &mut W,
    line: usize,
    column: usize,
    source_line: &str,
    severity: Severity,
    max_line_width: usize,
) {
    let caret_char = match severity {
        Severity::Error => "^".red(),
        Severity::Warning => "^".yellow(),
    };

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        source_line,
        width = max_line_width
    );

    // Caret pointing to the column (column is 1-based)
    let prefix: String = source_line.chars().take(column.saturating_sub(1)).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        caret_char,
        width = max_line_width,
        padding = caret_padding
    );
}

// ============================================================
// check
// ============================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput<'a> {
    reference: &'a str,
    locales: &'a [LocaleCheck],
    parse_errors: Vec<ParseErrorOutput<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParseErrorOutput<'a> {
    locale: &'a str,
    file: &'a Path,
    line: usize,
    column: usize,
    message: &'a str,
}

fn check_json(summary: &CheckSummary, findings: &[Finding]) -> Result<String> {
    let parse_errors = findings
        .iter()
        .filter_map(|f| match f {
            Finding::LocaleParseError(e) => Some(ParseErrorOutput {
                locale: &e.locale,
                file: &e.file,
                line: e.error.line,
                column: e.error.column,
                message: &e.error.message,
            }),
            _ => None,
        })
        .collect();
    let output = CheckOutput {
        reference: &summary.reference,
        locales: &summary.checks,
        parse_errors,
    };
    serde_json::to_string_pretty(&output).context("Failed to serialize report")
}

pub fn print_check_to<W: Write>(
    summary: &CheckSummary,
    findings: &[Finding],
    verbose: bool,
    writer: &mut W,
) -> Result<()> {
    if let Some(output) = &summary.output {
        let json = check_json(summary, findings)?;
        fs::write(output, format!("{}\n", json))
            .with_context(|| format!("Failed to write report: {}", output.display()))?;
    }

    if summary.format == OutputFormat::Json {
        match &summary.output {
            Some(output) => {
                let _ = writeln!(
                    writer,
                    "{} {}",
                    SUCCESS_MARK.green(),
                    format!("Wrote report to {}", output.display()).green()
                );
            }
            None => {
                let _ = writeln!(writer, "{}", check_json(summary, findings)?);
            }
        }
        return Ok(());
    }

    print_findings_to(findings, writer);
    for check in &summary.checks {
        print_locale_table_to(check, verbose, writer);
    }
    print_check_footer_to(summary, writer);
    Ok(())
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(fill))
}

fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

fn print_locale_table_to<W: Write>(check: &LocaleCheck, verbose: bool, writer: &mut W) {
    let report = &check.report;
    let headline = format!(
        "{}: {}/{} keys complete ({})",
        check.locale,
        report.complete(),
        report.total,
        percent(report.completion_rate)
    );
    if report.is_complete() {
        let _ = writeln!(writer, "{}", headline.green());
    } else {
        let _ = writeln!(writer, "{}", headline.bold());
    }

    let counts: Vec<String> = Status::ALL
        .iter()
        .filter(|status| !status.is_complete())
        .filter(|status| verbose || report.count(**status) > 0)
        .map(|status| format!("{} {}", status, report.count(*status)))
        .collect();
    if !counts.is_empty() {
        let _ = writeln!(writer, "  {}", counts.join(", ").dimmed());
    }

    if report.categories.is_empty() {
        let _ = writeln!(writer);
        return;
    }

    let rows: Vec<[String; 4]> = report
        .categories
        .iter()
        .map(|c| {
            [
                c.category.to_string(),
                c.priority.to_string(),
                format!("{}/{}", c.complete, c.total),
                percent(c.completion_rate),
            ]
        })
        .collect();
    let header = ["category", "priority", "complete", "rate"];
    let mut widths = header.map(|cell| UnicodeWidthStr::width(cell));
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let render = |cells: [&str; 4]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad(cell, width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let _ = writeln!(writer, "  {}", render(header).dimmed());
    for row in &rows {
        let _ = writeln!(
            writer,
            "  {}",
            render([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()])
        );
    }
    let _ = writeln!(writer);
}

fn print_check_footer_to<W: Write>(summary: &CheckSummary, writer: &mut W) {
    let incomplete: usize = summary.checks.iter().map(|c| c.report.incomplete()).sum();
    let locales = summary.checks.len();

    if locales == 0 && summary.skipped == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("No target locales to check against {}", summary.reference).green()
        );
        return;
    }

    if incomplete == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} {} against {} - all keys complete",
                locales,
                if locales == 1 { "locale" } else { "locales" },
                summary.reference
            )
            .green()
        );
    } else {
        let with_gaps = summary
            .checks
            .iter()
            .filter(|c| !c.report.is_complete())
            .count();
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "{} incomplete {} in {} {}",
                incomplete,
                if incomplete == 1 { "key" } else { "keys" },
                with_gaps,
                if with_gaps == 1 { "locale" } else { "locales" }
            )
            .red()
        );
    }

    if summary.skipped > 0 {
        let _ = writeln!(
            writer,
            "{} {} locale file(s) could not be parsed",
            "warning:".bold().yellow(),
            summary.skipped
        );
    }
}

// ============================================================
// keys / merge / init
// ============================================================

pub fn print_keys_to<W: Write>(summary: &KeysSummary, writer: &mut W) {
    for path in &summary.paths {
        let _ = writeln!(writer, "{}", path);
    }
}

pub fn print_merge_to<W: Write>(summary: &MergeSummary, findings: &[Finding], writer: &mut W) {
    let applied = &summary.applied;
    let file = applied.file.display().to_string();

    if summary.patch.is_empty() {
        let message = match summary.source {
            MergeSource::Fill => format!("{} has no missing keys", applied.locale),
            MergeSource::Patch => "Patch is empty".to_string(),
        };
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
        return;
    }

    let show_changes = !summary.is_apply || applied.blocked;
    if show_changes {
        for (change, (_, value)) in applied
            .outcome
            .changes
            .iter()
            .zip(summary.patch.entries())
        {
            let value = serde_json::to_string(value).unwrap_or_default();
            match change.kind {
                ChangeKind::Added => {
                    let _ = writeln!(writer, "  {} {}: {}", "+".green(), change.path, value);
                }
                ChangeKind::Updated => {
                    let _ = writeln!(writer, "  {} {}: {}", "~".yellow(), change.path, value);
                }
                ChangeKind::Unchanged => {}
            }
        }
        if applied.outcome.changes.iter().any(|c| c.kind != ChangeKind::Unchanged) {
            let _ = writeln!(writer);
        }
    }

    print_findings_to(findings, writer);

    let added = applied.outcome.count(ChangeKind::Added);
    let updated = applied.outcome.count(ChangeKind::Updated);
    let counts = format!("{} added, {} updated", added, updated);

    if applied.outcome.is_noop() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("{} is already up to date", file).green()
        );
    } else if applied.blocked {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "Not written: {} structural override(s) in {}",
                applied.outcome.overrides.len(),
                file
            )
            .red()
        );
    } else if applied.written.is_some() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Wrote {} ({})", file, counts).green()
        );
        if let Some(backup) = &summary.backup {
            let _ = writeln!(writer, "  {} {}", "backup:".dimmed(), backup.display());
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {}: {}. Run with {} to write.",
            "Dry run".bold(),
            file,
            counts,
            "--apply".cyan()
        );
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

// ============================================================
// Tests
// ============================================================
