//! JSON output for machine consumption.

use anyhow::Result;
use cuke_lint::LintResults;

/// Prints the full result set as pretty JSON.
pub(crate) fn render(results: &LintResults) -> Result<i32> {
    let json = serde_json::to_string_pretty(results)?;
    println!("{json}");
    Ok(i32::from(results.has_findings()))
}
