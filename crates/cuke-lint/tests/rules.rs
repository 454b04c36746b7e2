//! End-to-end rule suites over fixture feature files.
//!
//! Each case lints one fixture under `tests/data/` and compares the full
//! rendered finding list (line, message, tip) against expectations.

use cuke_lint::{Finding, Linter};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// An expected finding: line, message, optional tip.
type Expected = (usize, &'static str, Option<&'static str>);

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn render(line: Option<usize>, message: &str, tip: Option<&str>) -> String {
    let mut out = match line {
        Some(line) => format!("{line:02}: {message}"),
        None => format!("--: {message}"),
    };
    if let Some(tip) = tip {
        let _ = write!(out, "\n    \u{1f4a1} {tip}");
    }
    out
}

fn lint(name: &str, expected: &[Expected]) {
    let linter = Linter::new();
    let findings = linter.lint_file(&fixture(name)).expect("lint fixture");

    let expected: Vec<String> = expected
        .iter()
        .map(|(line, message, tip)| render(Some(*line), message, *tip))
        .collect();
    let actual: Vec<String> = findings
        .iter()
        .map(|f: &Finding| render(f.line, &f.message, f.tip.as_deref()))
        .collect();

    assert_eq!(expected.join("\n"), actual.join("\n"));
}

#[test]
fn empty_background() {
    lint(
        "background-empty.feature",
        &[(3, "A background must not be declared if it's empty.", None)],
    );
}

#[test]
fn background_with_incorrect_steps() {
    lint(
        "background-incorrect-steps.feature",
        &[
            (
                5,
                "Steps in a Background beyond the first one should start with 'And'",
                None,
            ),
            (
                5,
                "Steps in a Background beyond the first one should be indented on the same level as the first one. Expected 5 spaces, got 7.",
                None,
            ),
        ],
    );
}

#[test]
fn scenarios_not_starting_with_given() {
    lint(
        "scenario-incorrect-start.feature",
        &[
            (7, "The first step in a Scenario must be 'Given'", None),
            (10, "The first step in a Scenario must be 'Given'", None),
            (13, "The first step in a Scenario must be 'Given'", None),
        ],
    );
}

#[test]
fn scenario_keyword_order() {
    lint(
        "scenario-keyword-order.feature",
        &[
            (
                6,
                "'Given' must only occur once in a scenario to signify the arrange stage of the test. Using it multiple times is an indicator you might want multiple scenarios. Link multiple arrange actions using 'And'.",
                None,
            ),
            (
                11,
                "Found 'Then' keyword before 'When'. 'Then' should be used to signal the assertion stage of the test.",
                None,
            ),
            (
                18,
                "Found duplicate 'When' keyword. 'When' should be used to signal the act stage of the test, link multiple actions using 'And'.",
                None,
            ),
            (
                27,
                "Found duplicate 'Then' keyword. 'Then' should be used to signal the assertion stage of the test, link multiple assertions using 'And'.",
                None,
            ),
        ],
    );
}

#[test]
fn scenario_stage_separation() {
    lint(
        "scenario-stage-separation.feature",
        &[
            (
                5,
                "Expected 1 blank line before start of the 'act' block, found 0.",
                None,
            ),
            (
                6,
                "Expected 1 blank line before start of the 'assert' block, found 0.",
                None,
            ),
            (
                13,
                "Expected 1 blank line before start of the 'act' block, found 0.",
                None,
            ),
        ],
    );
}

#[test]
fn scenario_indentation() {
    lint(
        "indentation-error.feature",
        &[
            (
                5,
                "Steps in a scenario beyond the first one should be indented on the same level as the first one. Expected 5 spaces, got 7.",
                None,
            ),
            (
                8,
                "Steps in a scenario beyond the first one should be indented on the same level as the first one. Expected 5 spaces, got 3.",
                None,
            ),
            (
                11,
                "Steps in a scenario beyond the first one should be indented on the same level as the first one. Expected 5 spaces, got 9.",
                None,
            ),
        ],
    );
}

#[test]
fn invalid_tag() {
    lint(
        "invalid-tag.feature",
        &[(
            1,
            "Tag '@unit' is not a valid behat control tag.",
            Some("Use folders rather than tags for test organization."),
        )],
    );
}

#[test]
fn clean_feature_has_no_findings() {
    lint("noerrors.feature", &[]);
}

#[test]
fn parse_error_is_the_single_finding() {
    lint(
        "parse-error.feature",
        &[(1, "Found a step before the 'Feature:' declaration", None)],
    );
}

#[test]
fn linting_a_fixture_twice_is_deterministic() {
    let linter = Linter::new();
    let path = fixture("scenario-keyword-order.feature");

    let first = linter.lint_file(&path).expect("lint");
    let second = linter.lint_file(&path).expect("lint");

    assert_eq!(first, second);
}
