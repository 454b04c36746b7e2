//! The line scanner building [`Document`] values.

use crate::keyword;
use cuke_lint_core::{
    Background, Comment, DataTable, Document, FeatureChild, Location, Scenario, Step, TableRow,
    Tag,
};
use std::mem;

/// Terminal parse failure for one feature file.
///
/// A parse error bypasses rule evaluation entirely; the runner reports it
/// as the file's single finding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A construct appeared before the `Feature:` declaration.
    #[error("Found {found} before the 'Feature:' declaration")]
    BeforeFeature {
        /// What was found, e.g. "a step".
        found: String,
        /// Offending line.
        line: usize,
    },

    /// A step line outside any background or scenario.
    #[error("Step does not belong to a Background or Scenario")]
    DanglingStep {
        /// Offending line.
        line: usize,
    },

    /// A table row with no step to attach to.
    #[error("Table row does not belong to a step")]
    DanglingTableRow {
        /// Offending line.
        line: usize,
    },

    /// A second `Background:` in one feature.
    #[error("A feature may declare at most one Background")]
    DuplicateBackground {
        /// Offending line.
        line: usize,
    },

    /// A doc string that is never closed.
    #[error("Doc string opened on line {start} is never closed")]
    UnterminatedDocString {
        /// Line of the opening delimiter.
        start: usize,
    },
}

impl ParseError {
    /// The 1-based line the error points at, when known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::BeforeFeature { line, .. }
            | Self::DanglingStep { line }
            | Self::DanglingTableRow { line }
            | Self::DuplicateBackground { line }
            | Self::UnterminatedDocString { start: line } => Some(*line),
        }
    }
}

/// Parses one feature file into a document.
///
/// # Errors
///
/// Returns a [`ParseError`] on the first structural problem; parsing does
/// not attempt recovery.
pub fn parse(uri: impl Into<String>, source: &str) -> Result<Document, ParseError> {
    let mut parser = Parser::new(uri.into());
    for (index, raw) in source.lines().enumerate() {
        parser.scan_line(index + 1, raw.strip_suffix('\r').unwrap_or(raw))?;
    }
    parser.finish()
}

enum Block {
    None,
    Background(Background),
    Scenario(Scenario),
}

struct Parser {
    document: Document,
    pending_tags: Vec<Tag>,
    block: Block,
    seen_feature: bool,
    seen_background: bool,
    in_examples: bool,
    doc_string: Option<(&'static str, usize)>,
}

impl Parser {
    fn new(uri: String) -> Self {
        Self {
            document: Document::new(uri),
            pending_tags: Vec::new(),
            block: Block::None,
            seen_feature: false,
            seen_background: false,
            in_examples: false,
            doc_string: None,
        }
    }

    fn scan_line(&mut self, line_no: usize, line: &str) -> Result<(), ParseError> {
        let trimmed = line.trim_start();
        let column = line.chars().count() - trimmed.chars().count() + 1;
        let trimmed = trimmed.trim_end();

        // Doc string contents are opaque: no comments, no steps, no tables.
        if let Some((delimiter, _)) = self.doc_string {
            if trimmed == delimiter {
                self.doc_string = None;
            }
            return Ok(());
        }

        if trimmed.is_empty() {
            return Ok(());
        }

        if let Some(delimiter) = doc_string_delimiter(trimmed) {
            self.doc_string = Some((delimiter, line_no));
            return Ok(());
        }

        if trimmed.starts_with('#') {
            self.document
                .comments
                .push(Comment::new(Location::new(line_no, column)));
            return Ok(());
        }

        if trimmed.starts_with('@') {
            self.collect_tags(line_no, line);
            return Ok(());
        }

        if trimmed.starts_with("Feature:") {
            if !self.seen_feature {
                self.seen_feature = true;
                self.document.tags = mem::take(&mut self.pending_tags);
            }
            return Ok(());
        }

        if trimmed.starts_with("Background:") {
            if !self.seen_feature {
                return Err(ParseError::BeforeFeature {
                    found: "a Background".into(),
                    line: line_no,
                });
            }
            if self.seen_background {
                return Err(ParseError::DuplicateBackground { line: line_no });
            }
            self.seen_background = true;
            self.open_block(Block::Background(Background {
                location: Location::new(line_no, column),
                steps: Vec::new(),
            }));
            // Backgrounds take no tags; drop any that were pending.
            self.pending_tags.clear();
            return Ok(());
        }

        if is_examples_header(trimmed) {
            // Example tables are not part of the linted model.
            self.in_examples = true;
            self.pending_tags.clear();
            return Ok(());
        }

        if let Some(name) = scenario_header(trimmed) {
            if !self.seen_feature {
                return Err(ParseError::BeforeFeature {
                    found: "a Scenario".into(),
                    line: line_no,
                });
            }
            let tags = mem::take(&mut self.pending_tags);
            self.open_block(Block::Scenario(Scenario {
                name: name.to_string(),
                location: Location::new(line_no, column),
                tags,
                steps: Vec::new(),
            }));
            return Ok(());
        }

        if trimmed.starts_with('|') {
            return self.attach_table_row(line_no, column, trimmed);
        }

        if let Some((role, text)) = keyword::classify(trimmed) {
            return self.push_step(Step::new(role, text, Location::new(line_no, column)));
        }

        // Anything else is description text.
        Ok(())
    }

    fn open_block(&mut self, block: Block) {
        self.flush_block();
        self.block = block;
        self.in_examples = false;
    }

    fn flush_block(&mut self) {
        match mem::replace(&mut self.block, Block::None) {
            Block::None => {}
            Block::Background(background) => {
                // Kept even when empty; the engine reports empty backgrounds.
                self.document
                    .children
                    .push(FeatureChild::Background(background));
            }
            Block::Scenario(scenario) => {
                // The engine requires scenarios to have steps; a step-less
                // scenario has nothing to lint.
                if !scenario.steps.is_empty() {
                    self.document
                        .children
                        .push(FeatureChild::Scenario(scenario));
                }
            }
        }
    }

    fn push_step(&mut self, step: Step) -> Result<(), ParseError> {
        let line = step.location.line;
        match &mut self.block {
            Block::Background(background) => {
                background.steps.push(step);
                Ok(())
            }
            Block::Scenario(scenario) => {
                self.in_examples = false;
                scenario.steps.push(step);
                Ok(())
            }
            Block::None => {
                if self.seen_feature {
                    Err(ParseError::DanglingStep { line })
                } else {
                    Err(ParseError::BeforeFeature {
                        found: "a step".into(),
                        line,
                    })
                }
            }
        }
    }

    fn attach_table_row(
        &mut self,
        line_no: usize,
        column: usize,
        trimmed: &str,
    ) -> Result<(), ParseError> {
        if self.in_examples {
            return Ok(());
        }

        let last_step = match &mut self.block {
            Block::Background(background) => background.steps.last_mut(),
            Block::Scenario(scenario) => scenario.steps.last_mut(),
            Block::None => None,
        };
        let Some(step) = last_step else {
            return Err(ParseError::DanglingTableRow { line: line_no });
        };

        step.data_table
            .get_or_insert_with(|| DataTable { rows: Vec::new() })
            .rows
            .push(TableRow {
                cells: parse_cells(trimmed),
                location: Location::new(line_no, column),
            });
        Ok(())
    }

    /// Collects every `@word` on a tag line, each with its own column.
    ///
    /// A `#` token ends the line (trailing comments are legal on tag
    /// lines); other stray tokens are ignored.
    fn collect_tags(&mut self, line_no: usize, line: &str) {
        let mut column = 0usize;
        let mut word = String::new();
        let mut word_column = 0usize;

        for ch in line.chars().chain(std::iter::once(' ')) {
            column += 1;
            if ch.is_whitespace() {
                if word.starts_with('#') {
                    return;
                }
                if word.starts_with('@') {
                    self.pending_tags
                        .push(Tag::new(mem::take(&mut word), Location::new(line_no, word_column)));
                } else {
                    word.clear();
                }
            } else {
                if word.is_empty() {
                    word_column = column;
                }
                word.push(ch);
            }
        }
    }

    fn finish(mut self) -> Result<Document, ParseError> {
        if let Some((_, start)) = self.doc_string {
            return Err(ParseError::UnterminatedDocString { start });
        }
        self.flush_block();
        Ok(self.document)
    }
}

fn doc_string_delimiter(trimmed: &str) -> Option<&'static str> {
    if trimmed.starts_with("\"\"\"") {
        Some("\"\"\"")
    } else if trimmed.starts_with("```") {
        Some("```")
    } else {
        None
    }
}

fn is_examples_header(trimmed: &str) -> bool {
    trimmed.starts_with("Examples:") || trimmed.starts_with("Scenarios:")
}

fn scenario_header(trimmed: &str) -> Option<&str> {
    for header in [
        "Scenario Outline:",
        "Scenario Template:",
        "Scenario:",
        "Example:",
    ] {
        if let Some(rest) = trimmed.strip_prefix(header) {
            return Some(rest.trim());
        }
    }
    None
}

fn parse_cells(trimmed: &str) -> Vec<String> {
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuke_lint_core::StepKeyword;

    fn children(document: &Document) -> &[FeatureChild] {
        &document.children
    }

    fn expect_scenario(child: &FeatureChild) -> &Scenario {
        match child {
            FeatureChild::Scenario(scenario) => scenario,
            FeatureChild::Background(_) => panic!("expected a scenario"),
        }
    }

    fn expect_background(child: &FeatureChild) -> &Background {
        match child {
            FeatureChild::Background(background) => background,
            FeatureChild::Scenario(_) => panic!("expected a background"),
        }
    }

    #[test]
    fn parses_a_complete_feature() {
        let source = "\
@api @wip
Feature: User management
  As an administrator I manage users.

  Background:
    Given the site is installed
    And caching is disabled

  Scenario: Creating a user
    Given I am logged in as an administrator

    When I submit the new user form

    Then a user is created
";
        let document = parse("users.feature", source).expect("parse");

        assert_eq!(document.uri, "users.feature");
        assert_eq!(document.tags.len(), 2);
        assert_eq!(document.tags[0].name, "@api");
        assert_eq!(document.tags[0].location, Location::new(1, 1));
        assert_eq!(document.tags[1].name, "@wip");
        assert_eq!(document.tags[1].location, Location::new(1, 6));

        let kids = children(&document);
        assert_eq!(kids.len(), 2);

        let background = expect_background(&kids[0]);
        assert_eq!(background.location, Location::new(5, 3));
        assert_eq!(background.steps.len(), 2);
        assert_eq!(background.steps[0].keyword, StepKeyword::Context);
        assert_eq!(background.steps[0].location, Location::new(6, 5));
        assert_eq!(background.steps[0].text, "the site is installed");
        assert_eq!(background.steps[1].keyword, StepKeyword::Conjunction);

        let scenario = expect_scenario(&kids[1]);
        assert_eq!(scenario.name, "Creating a user");
        assert_eq!(scenario.location, Location::new(9, 3));
        assert_eq!(scenario.steps.len(), 3);
        assert_eq!(scenario.steps[1].keyword, StepKeyword::Action);
        assert_eq!(scenario.steps[1].location, Location::new(12, 5));
        assert_eq!(scenario.steps[2].keyword, StepKeyword::Outcome);
        assert_eq!(scenario.steps[2].location, Location::new(14, 5));
    }

    #[test]
    fn comments_are_collected_in_line_order() {
        let source = "\
# header comment
Feature: Comments
  Scenario: With comments
    Given a step
    # between steps
    When another step
# trailing
";
        let document = parse("comments.feature", source).expect("parse");

        let lines: Vec<usize> = document.comments.iter().map(|c| c.location.line).collect();
        assert_eq!(lines, vec![1, 5, 7]);
        assert_eq!(document.comments[1].location.column, 5);
    }

    #[test]
    fn data_table_rows_attach_to_their_step() {
        let source = "\
Feature: Tables
  Scenario: With a table
    Given these users:
      | name  | role  |
      | alice | admin |
      | bob   | guest |

    When the import runs
";
        let document = parse("tables.feature", source).expect("parse");
        let scenario = expect_scenario(&document.children[0]);

        let table = scenario.steps[0].data_table.as_ref().expect("table");
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].cells, vec!["name", "role"]);
        assert_eq!(table.rows[1].location, Location::new(5, 7));
        assert_eq!(scenario.steps[0].end_line(), 6);
        assert_eq!(scenario.steps[1].location.line, 8);
    }

    #[test]
    fn doc_strings_are_opaque() {
        let source = "\
Feature: Doc strings
  Scenario: With payload
    Given a request body:
      \"\"\"
      # not a comment
      When not a step
      \"\"\"
    When it is sent
";
        let document = parse("docstring.feature", source).expect("parse");
        let scenario = expect_scenario(&document.children[0]);

        assert!(document.comments.is_empty());
        assert_eq!(scenario.steps.len(), 2);
        assert_eq!(scenario.steps[1].location.line, 8);
    }

    #[test]
    fn unterminated_doc_string_is_an_error() {
        let source = "\
Feature: Doc strings
  Scenario: Broken
    Given a request body:
      \"\"\"
      dangling
";
        let error = parse("broken.feature", source).expect_err("must fail");
        assert_eq!(error, ParseError::UnterminatedDocString { start: 4 });
        assert_eq!(error.line(), Some(4));
    }

    #[test]
    fn scenario_outline_examples_are_consumed() {
        let source = "\
Feature: Outlines
  Scenario Outline: Login as <role>
    Given I am logged in as <role>

    When I open the dashboard

    Then I see the <widget> widget

    Examples:
      | role   | widget  |
      | admin  | reports |
      | editor | drafts  |
";
        let document = parse("outline.feature", source).expect("parse");
        let scenario = expect_scenario(&document.children[0]);

        assert_eq!(scenario.name, "Login as <role>");
        assert_eq!(scenario.steps.len(), 3);
        // The examples table must not attach to the last step.
        assert!(scenario.steps[2].data_table.is_none());
    }

    #[test]
    fn scenario_tags_attach_to_the_scenario() {
        let source = "\
Feature: Tagging
  @javascript
  Scenario: Interactive
    Given a browser
";
        let document = parse("tags.feature", source).expect("parse");
        let scenario = expect_scenario(&document.children[0]);

        assert!(document.tags.is_empty());
        assert_eq!(scenario.tags.len(), 1);
        assert_eq!(scenario.tags[0].name, "@javascript");
        assert_eq!(scenario.tags[0].location, Location::new(2, 3));
    }

    #[test]
    fn trailing_comment_on_tag_line_is_ignored() {
        let source = "\
@api # only enabled on ci
Feature: Tagging
  Scenario: Anything
    Given a step
";
        let document = parse("tags.feature", source).expect("parse");
        assert_eq!(document.tags.len(), 1);
        assert_eq!(document.tags[0].name, "@api");
    }

    #[test]
    fn step_less_scenarios_are_dropped() {
        let source = "\
Feature: Sparse
  Scenario: Not yet written

  Scenario: Written
    Given a step
";
        let document = parse("sparse.feature", source).expect("parse");

        assert_eq!(document.children.len(), 1);
        assert_eq!(expect_scenario(&document.children[0]).name, "Written");
    }

    #[test]
    fn empty_background_is_kept() {
        let source = "\
Feature: Sparse
  Background:

  Scenario: Written
    Given a step
";
        let document = parse("sparse.feature", source).expect("parse");

        assert_eq!(document.children.len(), 2);
        assert!(expect_background(&document.children[0]).steps.is_empty());
    }

    #[test]
    fn step_before_feature_is_an_error() {
        let error = parse("bad.feature", "Given a step\n").expect_err("must fail");
        assert_eq!(
            error,
            ParseError::BeforeFeature {
                found: "a step".into(),
                line: 1
            }
        );
    }

    #[test]
    fn step_outside_a_block_is_an_error() {
        let source = "\
Feature: Bad
  Given a step
";
        let error = parse("bad.feature", source).expect_err("must fail");
        assert_eq!(error, ParseError::DanglingStep { line: 2 });
    }

    #[test]
    fn dangling_table_row_is_an_error() {
        let source = "\
Feature: Bad
  Scenario: Table first
    | a | b |
";
        let error = parse("bad.feature", source).expect_err("must fail");
        assert_eq!(error, ParseError::DanglingTableRow { line: 3 });
    }

    #[test]
    fn second_background_is_an_error() {
        let source = "\
Feature: Bad
  Background:
    Given a step

  Background:
    Given another step
";
        let error = parse("bad.feature", source).expect_err("must fail");
        assert_eq!(error, ParseError::DuplicateBackground { line: 5 });
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let source = "Feature: Windows\r\n  Scenario: CRLF\r\n    Given a step\r\n";
        let document = parse("crlf.feature", source).expect("parse");
        let scenario = expect_scenario(&document.children[0]);

        assert_eq!(scenario.steps[0].text, "a step");
        assert_eq!(scenario.steps[0].location, Location::new(3, 5));
    }

    #[test]
    fn description_text_is_ignored() {
        let source = "\
Feature: Prose
  In order to ship features
  As a developer
  I write scenarios

  Scenario: Plain
    Given a step
";
        let document = parse("prose.feature", source).expect("parse");
        assert_eq!(document.children.len(), 1);
    }
}
