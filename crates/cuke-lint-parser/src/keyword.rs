//! Step keyword spelling to role classification.
//!
//! The engine only ever sees [`StepKeyword`] roles; the mapping from
//! concrete spellings lives here so that a translated vocabulary is a
//! parser-only change.

use cuke_lint_core::StepKeyword;

/// Spellings classified as the arrange stage.
const CONTEXT: &[&str] = &["Given"];

/// Spellings classified as the act stage.
const ACTION: &[&str] = &["When"];

/// Spellings classified as the assert stage.
const OUTCOME: &[&str] = &["Then"];

/// Spellings that continue the enclosing stage.
const CONJUNCTION: &[&str] = &["And", "But", "*"];

/// Splits a trimmed line into a classified step keyword and the step text.
///
/// Returns `None` when the line does not start with a step keyword, in
/// which case it is description text to the parser. The keyword must be
/// followed by whitespace (`*` may also stand alone).
pub(crate) fn classify(line: &str) -> Option<(StepKeyword, &str)> {
    for (spellings, role) in [
        (CONTEXT, StepKeyword::Context),
        (ACTION, StepKeyword::Action),
        (OUTCOME, StepKeyword::Outcome),
        (CONJUNCTION, StepKeyword::Conjunction),
    ] {
        for spelling in spellings {
            if let Some(rest) = line.strip_prefix(spelling) {
                if rest.is_empty() && *spelling == "*" {
                    return Some((role, ""));
                }
                if rest.starts_with(char::is_whitespace) {
                    return Some((role, rest.trim_start()));
                }
            }
        }
    }
    None
}
