//! The rule evaluation engine.
//!
//! [`Engine::lint_document`] walks one parsed [`Document`] and produces a
//! flat, ordered list of [`Finding`]s: tag findings first, then per-child
//! findings in source order. The engine is a pure function over the
//! document - no I/O, no shared mutable state - so callers may lint many
//! files concurrently with one shared `Engine`.
//!
//! Violations of the document invariants (anonymous uri, empty scenario
//! step list, unsorted comments, non-positive line gaps) are programming
//! errors in the upstream parser and abort via assertions rather than
//! being reported as findings.

use crate::document::{Background, Document, FeatureChild, Scenario, Step, StepKeyword, Tag};
use crate::finding::Finding;
use tracing::debug;

/// Tags that are valid behat control tags.
///
/// Anything else on the feature line is assumed to be test organization,
/// which folders express better.
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "@api",
    "@javascript",
    "@no-database",
    "@no-install",
    "@no-update",
    "@disabled",
];

const TAG_TIP: &str = "Use folders rather than tags for test organization.";

/// The stateless rule engine.
///
/// Holds only the tag allow-list; construct once and share freely.
#[derive(Debug, Clone)]
pub struct Engine {
    allowed_tags: Vec<String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with the built-in tag allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allowed_tags: DEFAULT_ALLOWED_TAGS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Creates an engine with a custom tag allow-list.
    #[must_use]
    pub fn with_allowed_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// The tag allow-list this engine validates against.
    #[must_use]
    pub fn allowed_tags(&self) -> &[String] {
        &self.allowed_tags
    }

    /// Lints one document and returns all findings in document order.
    ///
    /// # Panics
    ///
    /// Panics if the document violates its invariants: empty `uri`,
    /// unsorted `comments`, a scenario without steps, or steps whose line
    /// numbers are not strictly increasing.
    #[must_use]
    pub fn lint_document(&self, document: &Document) -> Vec<Finding> {
        assert!(!document.uri.is_empty(), "can not lint anonymous documents");
        assert!(
            document
                .comments
                .windows(2)
                .all(|pair| pair[0].location.line <= pair[1].location.line),
            "document comments must be sorted ascending by line"
        );

        let mut findings = self.validate_tags(&document.uri, &document.tags);

        for child in &document.children {
            match child {
                FeatureChild::Background(background) => {
                    findings.extend(self.check_background(document, background));
                }
                FeatureChild::Scenario(scenario) => {
                    findings.extend(self.check_scenario(document, scenario));
                }
            }
        }

        debug!(
            uri = %document.uri,
            findings = findings.len(),
            "linted document"
        );

        findings
    }

    /// Checks feature-level tags against the allow-list.
    ///
    /// Empty tag names are skipped; everything else must appear verbatim in
    /// the allow-list. Findings follow tag order in the document.
    #[must_use]
    pub fn validate_tags(&self, uri: &str, tags: &[Tag]) -> Vec<Finding> {
        let mut findings = Vec::new();

        for tag in tags {
            if tag.name.is_empty() || self.allowed_tags.iter().any(|t| t == &tag.name) {
                continue;
            }
            findings.push(
                Finding::new(
                    format!("Tag '{}' is not a valid behat control tag.", tag.name),
                    uri,
                )
                .with_line(tag.location.line)
                .with_tip(TAG_TIP),
            );
        }

        findings
    }

    /// Checks a background: non-empty, `Given` first, `And` plus uniform
    /// indentation for every step after the first.
    #[must_use]
    pub fn check_background(&self, document: &Document, background: &Background) -> Vec<Finding> {
        let uri = &document.uri;

        let Some(first) = background.steps.first() else {
            return vec![Finding::new(
                "A background must not be declared if it's empty.",
                uri,
            )
            .with_line(background.location.line)];
        };

        let mut findings = Vec::new();

        if first.keyword != StepKeyword::Context {
            findings.push(
                Finding::new("The first step in a Background must be 'Given'", uri)
                    .with_line(first.location.line),
            );
        }

        for step in &background.steps[1..] {
            if step.keyword != StepKeyword::Conjunction {
                findings.push(
                    Finding::new(
                        "Steps in a Background beyond the first one should start with 'And'",
                        uri,
                    )
                    .with_line(step.location.line),
                );
            }

            if step.location.column != first.location.column {
                findings.push(
                    Finding::new(
                        format!(
                            "Steps in a Background beyond the first one should be indented on the same level as the first one. Expected {} spaces, got {}.",
                            first.location.column, step.location.column
                        ),
                        uri,
                    )
                    .with_line(step.location.line),
                );
            }
        }

        findings
    }

    /// Checks a scenario's arrange/act/assert structure in a single
    /// forward pass.
    ///
    /// Per non-first step: uniform indentation, at most one `Given`, `When`
    /// before `Then`, no duplicate `When`/`Then`, and exactly one blank
    /// line before the act and assert blocks. Checks are independent and
    /// never short-circuit the remaining steps.
    ///
    /// # Panics
    ///
    /// Panics if the scenario has no steps; the parser guarantees
    /// otherwise.
    #[must_use]
    pub fn check_scenario(&self, document: &Document, scenario: &Scenario) -> Vec<Finding> {
        let uri = &document.uri;
        let first = scenario
            .steps
            .first()
            .unwrap_or_else(|| panic!("scenario '{}' has no steps", scenario.name));

        let mut findings = Vec::new();
        let mut seen_act = false;
        let mut seen_assert = false;

        if first.keyword != StepKeyword::Context {
            findings.push(
                Finding::new("The first step in a Scenario must be 'Given'", uri)
                    .with_line(first.location.line),
            );
        }

        for (index, step) in scenario.steps.iter().enumerate().skip(1) {
            if step.location.column != first.location.column {
                findings.push(
                    Finding::new(
                        format!(
                            "Steps in a scenario beyond the first one should be indented on the same level as the first one. Expected {} spaces, got {}.",
                            first.location.column, step.location.column
                        ),
                        uri,
                    )
                    .with_line(step.location.line),
                );
            }

            match step.keyword {
                StepKeyword::Context => {
                    findings.push(
                        Finding::new(
                            "'Given' must only occur once in a scenario to signify the arrange stage of the test. Using it multiple times is an indicator you might want multiple scenarios. Link multiple arrange actions using 'And'.",
                            uri,
                        )
                        .with_line(step.location.line),
                    );
                }
                StepKeyword::Action => {
                    if seen_act {
                        findings.push(
                            Finding::new(
                                "Found duplicate 'When' keyword. 'When' should be used to signal the act stage of the test, link multiple actions using 'And'.",
                                uri,
                            )
                            .with_line(step.location.line),
                        );
                    } else {
                        seen_act = true;
                        let blank_lines =
                            blank_lines_between(document, &scenario.steps[index - 1], step);
                        if blank_lines != 1 {
                            findings.push(
                                Finding::new(
                                    format!(
                                        "Expected 1 blank line before start of the 'act' block, found {blank_lines}."
                                    ),
                                    uri,
                                )
                                .with_line(step.location.line),
                            );
                        }
                    }
                }
                StepKeyword::Outcome => {
                    if !seen_act {
                        findings.push(
                            Finding::new(
                                "Found 'Then' keyword before 'When'. 'Then' should be used to signal the assertion stage of the test.",
                                uri,
                            )
                            .with_line(step.location.line),
                        );
                    } else if seen_assert {
                        findings.push(
                            Finding::new(
                                "Found duplicate 'Then' keyword. 'Then' should be used to signal the assertion stage of the test, link multiple assertions using 'And'.",
                                uri,
                            )
                            .with_line(step.location.line),
                        );
                    } else {
                        seen_assert = true;
                        let blank_lines =
                            blank_lines_between(document, &scenario.steps[index - 1], step);
                        if blank_lines != 1 {
                            findings.push(
                                Finding::new(
                                    format!(
                                        "Expected 1 blank line before start of the 'assert' block, found {blank_lines}."
                                    ),
                                    uri,
                                )
                                .with_line(step.location.line),
                            );
                        }
                    }
                }
                StepKeyword::Conjunction | StepKeyword::Unknown => {}
            }
        }

        findings
    }
}

/// Counts the true blank source lines between two adjacent steps.
///
/// The gap starts below `previous`'s last line (its own line plus one line
/// per data-table row) and ends above `current`'s line. Comment lines in
/// that window are not blank and are discounted.
///
/// # Panics
///
/// Panics if the steps are not on strictly increasing lines - the line gap
/// between consecutive statements must be at least one line.
fn blank_lines_between(document: &Document, previous: &Step, current: &Step) -> usize {
    let previous_end = previous.end_line();

    let mut comments_between = 0;
    for comment in &document.comments {
        let line = comment.location.line;
        if line <= previous_end {
            continue;
        }
        if line >= current.location.line {
            break;
        }
        comments_between += 1;
    }

    assert!(
        current.location.line > previous_end + comments_between,
        "step at line {} does not follow the previous statement ending at line {}",
        current.location.line,
        previous_end
    );
    let gap = current.location.line - previous_end - comments_between;

    // One line of the gap is the mandatory line break between statements.
    gap - 1
}
