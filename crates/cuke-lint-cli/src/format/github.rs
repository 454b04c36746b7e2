//! GitHub Actions workflow-command output.
//!
//! Emits one `::error` annotation per finding so problems surface inline
//! in pull-request diffs. Newlines in messages are `%0A`-encoded per the
//! workflow-command escaping rules.

use anyhow::Result;
use cuke_lint::{Finding, LintResults};
use std::path::Path;

/// Whether the process runs inside a GitHub Actions job.
pub(crate) fn running_in_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Prints one annotation per finding.
pub(crate) fn render(results: &LintResults) -> Result<i32> {
    let cwd = std::env::current_dir().ok();

    for file in &results.files {
        for finding in &file.findings {
            println!("{}", annotation(finding, cwd.as_deref()));
        }
    }

    Ok(i32::from(results.has_findings()))
}

fn annotation(finding: &Finding, cwd: Option<&Path>) -> String {
    let file = relative_path(finding.file_path(), cwd);
    let line = finding.line.map_or_else(String::new, |l| l.to_string());
    let message = finding.message.replace('\n', "%0A");
    format!("::error file={file},line={line},col=0::{message}")
}

/// Strips the working directory prefix and normalizes separators, so
/// annotations match the paths GitHub knows about.
fn relative_path(path: &str, cwd: Option<&Path>) -> String {
    if let Some(cwd) = cwd {
        let prefix = cwd.to_string_lossy();
        if !prefix.is_empty() {
            if let Some(rest) = path.strip_prefix(prefix.as_ref()) {
                return rest.trim_start_matches(['/', '\\']).replace('\\', "/");
            }
        }
    }
    path.replace('\\', "/")
}
