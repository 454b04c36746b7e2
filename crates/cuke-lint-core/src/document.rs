//! The parsed document model shared between the parser and the rule engine.
//!
//! These types are built once per file by the upstream parser and are
//! immutable for the duration of a lint pass. All locations are 1-based.

use serde::{Deserialize, Serialize};

/// A 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A feature- or scenario-level tag such as `@api`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag text including the leading `@`.
    pub name: String,
    /// Location of the `@` character.
    pub location: Location,
}

impl Tag {
    /// Creates a new tag.
    #[must_use]
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// A full-line `#` comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Location of the `#` character.
    pub location: Location,
}

impl Comment {
    /// Creates a new comment marker.
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self { location }
    }
}

/// One row of a data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cell values, left to right.
    pub cells: Vec<String>,
    /// Location of the opening `|`.
    pub location: Location,
}

/// A tabular literal attached to a step.
///
/// Each row occupies exactly one source line directly below the step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    /// Table rows in source order.
    pub rows: Vec<TableRow>,
}

/// The role a step keyword plays in a scenario, independent of its
/// natural-language spelling.
///
/// The engine matches exhaustively on this classification and never on
/// keyword text, so translated vocabularies only need a classifier change
/// in the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKeyword {
    /// `Given` - the arrange stage.
    Context,
    /// `And`/`But`/`*` - continuation of the enclosing stage.
    Conjunction,
    /// `When` - the act stage.
    Action,
    /// `Then` - the assert stage.
    Outcome,
    /// A keyword the classifier did not recognize.
    Unknown,
}

/// A single step of a background or scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Role classification of the step keyword.
    pub keyword: StepKeyword,
    /// Step text after the keyword.
    pub text: String,
    /// Location of the keyword's first character.
    pub location: Location,
    /// Data table attached to this step, if any.
    pub data_table: Option<DataTable>,
}

impl Step {
    /// Creates a new step without a data table.
    #[must_use]
    pub fn new(keyword: StepKeyword, text: impl Into<String>, location: Location) -> Self {
        Self {
            keyword,
            text: text.into(),
            location,
            data_table: None,
        }
    }

    /// Attaches a data table to this step.
    #[must_use]
    pub fn with_data_table(mut self, table: DataTable) -> Self {
        self.data_table = Some(table);
        self
    }

    /// The last source line occupied by this step.
    ///
    /// Each data-table row consumes exactly one line beyond the step's own.
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.location.line + self.data_table.as_ref().map_or(0, |t| t.rows.len())
    }
}

/// A `Background:` block - a shared preamble of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    /// Location of the `Background:` keyword.
    pub location: Location,
    /// Steps in source order. May be empty; the engine reports that.
    pub steps: Vec<Step>,
}

/// A `Scenario:` block - an individual test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario title.
    pub name: String,
    /// Location of the scenario keyword.
    pub location: Location,
    /// Scenario-level tags.
    pub tags: Vec<Tag>,
    /// Steps in source order. Invariant: non-empty, upheld by the parser.
    pub steps: Vec<Step>,
}

/// A direct child of a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureChild {
    /// A background block.
    Background(Background),
    /// A scenario block.
    Scenario(Scenario),
}

/// The parsed representation of one feature file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier of the source file. Invariant: non-empty.
    pub uri: String,
    /// Feature-level tags in source order.
    pub tags: Vec<Tag>,
    /// Backgrounds and scenarios in source order.
    pub children: Vec<FeatureChild>,
    /// Every comment line in the file. Invariant: sorted ascending by line.
    pub comments: Vec<Comment>,
}

impl Document {
    /// Creates an empty document for the given uri.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            tags: Vec::new(),
            children: Vec::new(),
            comments: Vec::new(),
        }
    }
}
