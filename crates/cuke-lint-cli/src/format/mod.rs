//! Output formatters for lint results.
//!
//! Each formatter prints the results and returns the process exit code:
//! non-zero exactly when any finding exists.

mod github;
mod json;
mod table;

use crate::OutputFormat;
use anyhow::Result;
use cuke_lint::LintResults;

/// Renders lint results in the requested format.
///
/// # Errors
///
/// Returns an error if serialization or terminal output fails.
pub fn render(results: &LintResults, format: OutputFormat) -> Result<i32> {
    match format {
        OutputFormat::Auto => {
            if github::running_in_github_actions() {
                github::render(results)
            } else {
                table::render(results)
            }
        }
        OutputFormat::Table => table::render(results),
        OutputFormat::Github => github::render(results),
        OutputFormat::Json => json::render(results),
    }
}
