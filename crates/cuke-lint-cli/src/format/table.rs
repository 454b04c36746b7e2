//! Human-readable per-file table output.

use anyhow::Result;
use cuke_lint::{FileFindings, LintResults};
use std::fmt::Write as _;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Prints one section per file with findings, or a success line.
pub(crate) fn render(results: &LintResults) -> Result<i32> {
    if !results.has_findings() {
        println!("{GREEN}[OK] No errors{RESET}");
        return Ok(0);
    }

    let vscode = std::env::var("TERM_PROGRAM").is_ok_and(|v| v == "vscode");

    for file in &results.files {
        if file.findings.is_empty() {
            continue;
        }
        print!("{}", format_file(file, vscode));
    }

    println!(
        "{RED}[ERROR] Found {} error(s) in {} file(s){RESET}",
        results.total_findings(),
        results.files_checked()
    );

    Ok(1)
}

fn format_file(file: &FileFindings, vscode: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", file.file.display());

    for finding in &file.findings {
        let _ = writeln!(
            out,
            "  {:>4}  {}",
            format_line_number(finding.line, vscode),
            finding.message
        );
        for tip_line in finding.tip_lines() {
            let _ = writeln!(
                out,
                "        \u{1f4a1} {}",
                tip_line.trim_start_matches([' ', '\u{2022}'])
            );
        }
    }

    let _ = writeln!(out);
    out
}

/// Renders a line number, or `:N` so the VS Code terminal makes it part
/// of a clickable file link.
fn format_line_number(line: Option<usize>, vscode: bool) -> String {
    match line {
        None => String::new(),
        Some(line) if vscode => format!(":{line}"),
        Some(line) => line.to_string(),
    }
}
