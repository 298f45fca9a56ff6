//! Report formatting and printing utilities.
//!
//! Diagnostics are printed cargo-style to stderr; stdout is reserved for the
//! updates JSON when no `--output` file is given.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, ExtractSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{Diagnostic, DiagnosticKind, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stderr = io::stderr().lock();
    match &result.summary {
        CommandSummary::Extract(summary) => {
            report_to(&result.errors, &result.warnings, &mut stderr);
            print_extract_to(summary, result, verbose, &mut stderr);
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Print diagnostics to a custom writer, sorted by location.
pub fn report_to<W: Write>(errors: &[Diagnostic], warnings: &[Diagnostic], writer: &mut W) {
    let mut sorted: Vec<(Severity, &Diagnostic)> = errors
        .iter()
        .map(|d| (Severity::Error, d))
        .chain(warnings.iter().map(|d| (Severity::Warning, d)))
        .collect();
    if sorted.is_empty() {
        return;
    }
    sorted.sort_by(|(_, a), (_, b)| compare_diagnostics(a, b));

    let max_line_width = sorted
        .iter()
        .map(|(_, d)| d.location.position().0)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1);

    for (severity, diagnostic) in &sorted {
        print_diagnostic(*severity, diagnostic, writer, max_line_width);
    }

    print_summary(errors.len(), warnings.len(), writer);
}

fn print_diagnostic<W: Write>(
    severity: Severity,
    diagnostic: &Diagnostic,
    writer: &mut W,
    max_line_width: usize,
) {
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };
    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        diagnostic.message,
        diagnostic.kind.to_string().dimmed().cyan()
    );

    let (line, col) = diagnostic.location.position();
    match diagnostic.source_line() {
        Some(source_line) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                diagnostic.file_path(),
                line,
                col
            );
            let caret_char = match severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };
            let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = max_line_width);
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                line.to_string().blue(),
                "|".blue(),
                source_line,
                width = max_line_width
            );

            // Caret pointing to the column (col is 1-based)
            let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
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
        None => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), diagnostic.file_path());
        }
    }

    if let Some(hint) = hint(diagnostic.kind) {
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

    let _ = writeln!(writer); // Empty line between diagnostics
}

fn hint(kind: DiagnosticKind) -> Option<&'static str> {
    match kind {
        DiagnosticKind::NonStaticContent | DiagnosticKind::TemplateLiteralWithInterpolation => {
            Some("wrap dynamic values in <Var>, <Num>, <Currency> or <DateTime>")
        }
        DiagnosticKind::AsyncSyncRuleViolation => {
            Some("use `useGT` in components and `getGT` in async server code")
        }
        DiagnosticKind::NonStaticMetadata => Some("pass a string literal"),
        DiagnosticKind::DuplicateId => Some("give each distinct message its own id"),
        _ => None,
    }
}

fn print_summary<W: Write>(total_errors: usize, total_warnings: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        total_errors + total_warnings,
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

fn print_extract_to<W: Write>(
    summary: &ExtractSummary,
    result: &CommandResult,
    verbose: bool,
    writer: &mut W,
) {
    let parse_errors = result
        .errors
        .iter()
        .filter(|d| d.kind == DiagnosticKind::ParseError)
        .count();
    if parse_errors > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed",
            "warning:".bold().yellow(),
            parse_errors
        );
    }

    let message = format!(
        "Extracted {} {} from {} {}",
        summary.unit_count,
        if summary.unit_count == 1 { "unit" } else { "units" },
        summary.files_scanned,
        if summary.files_scanned == 1 { "file" } else { "files" }
    );
    if result.errors.is_empty() {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
    } else {
        let _ = writeln!(writer, "{}", message);
    }

    if let Some(path) = &summary.output {
        let _ = writeln!(writer, "Wrote updates to {}", path.display().to_string().cyan());
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
        eprintln!("{} {} already exists", "error:".bold().red(), CONFIG_FILE_NAME);
    }
}

fn compare_diagnostics(a: &Diagnostic, b: &Diagnostic) -> std::cmp::Ordering {
    a.file_path()
        .cmp(b.file_path())
        .then_with(|| a.location.position().cmp(&b.location.position()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::{SourceContext, SourceLocation};

    fn render(errors: &[Diagnostic], warnings: &[Diagnostic]) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        report_to(errors, warnings, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_caret_under_column() {
        let ctx = SourceContext::new(
            SourceLocation::new("app/page.tsx", 3, 12),
            "  return <T>{name}</T>;",
        );
        let diag = Diagnostic::at(
            DiagnosticKind::NonStaticContent,
            ctx,
            "dynamic content `name` (identifier) inside translation scope",
        );

        insta::assert_snapshot!(render(&[diag], &[]), @r"
        error: dynamic content `name` (identifier) inside translation scope  non-static-content
          --> app/page.tsx:3:12
          |
        3 |   return <T>{name}</T>;
          |            ^
          = hint: wrap dynamic values in <Var>, <Num>, <Currency> or <DateTime>

        ✘ 1 problems (1 error, 0 warnings)
        ");
    }

    #[test]
    fn test_sorted_by_location_with_file_diagnostics() {
        let late = Diagnostic::at(
            DiagnosticKind::EmptyConstruct,
            SourceContext::new(SourceLocation::new("b.tsx", 9, 1), "<Branch />"),
            "Branch has no options; using its children",
        );
        let file = Diagnostic::file(DiagnosticKind::ParseError, "a.tsx", "failed to parse");

        let out = render(&[file], &[late]);
        let a = out.find("a.tsx").unwrap();
        let b = out.find("b.tsx").unwrap();
        assert!(a < b);
        assert!(out.ends_with("✘ 2 problems (1 error, 1 warning)\n"));
    }

    #[test]
    fn test_nothing_printed_without_diagnostics() {
        assert_eq!(render(&[], &[]), "");
    }
}
