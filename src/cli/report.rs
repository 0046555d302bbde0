//! Report formatting and printing utilities.
//!
//! Displays findings in cargo-style format. Separate from the engine so
//! intlint can be used as a library with a different reporting channel.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::findings::{Finding, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print findings in cargo-style format to stdout.
///
/// Findings are sorted by file, line, and column, and displayed with
/// severity, location, source context, and a closing summary.
pub fn report(findings: &[Finding]) {
    report_to(findings, &mut io::stdout().lock());
}

/// Print findings to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(findings: &[Finding], writer: &mut W) {
    if findings.is_empty() {
        return;
    }

    let mut sorted = findings.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for finding in &sorted {
        print_finding(finding, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no findings were produced.
pub fn print_success(source_files: usize, languages: usize) {
    print_success_to(source_files, languages, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(source_files: usize, languages: usize, writer: &mut W) {
    let msg = if languages == 0 {
        format!(
            "Checked {} source {} - no issues found",
            source_files,
            if source_files == 1 { "file" } else { "files" }
        )
    } else {
        format!(
            "Checked {} source {} against {} {} - no issues found",
            source_files,
            if source_files == 1 { "file" } else { "files" },
            languages,
            if languages == 1 { "language" } else { "languages" }
        )
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

// ============================================================
// Internal Functions
// ============================================================

fn print_finding<W: Write>(finding: &Finding, writer: &mut W, max_line_width: usize) {
    let loc = finding.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    let severity = finding.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        finding.message(),
        finding.report_rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path:line:col
    let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);

    if let Some(source_line) = source_line {
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

        // Caret pointing to the column (col is 1-based)
        let prefix = if col > 1 {
            source_line.chars().take(col - 1).collect::<String>()
        } else {
            String::new()
        };
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

    let _ = writeln!(writer); // Empty line between findings
}

fn print_summary<W: Write>(findings: &[Finding], writer: &mut W) {
    let total_errors = findings
        .iter()
        .filter(|f| f.report_severity() == Severity::Error)
        .count();
    let total_warnings = findings
        .iter()
        .filter(|f| f.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.location.file_path.as_str(),
            ctx.location.line,
            ctx.location.col,
            Some(&ctx.source_line),
        ),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(findings: &[Finding]) -> usize {
    findings
        .iter()
        .filter_map(|f| match f.location() {
            ReportLocation::Source(ctx) => Some(ctx.location.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}
