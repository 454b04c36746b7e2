//! # cuke-lint
//!
//! Static analysis for Cucumber and Behat feature files: enforces the tag
//! allow-list, non-empty backgrounds, `Given`/`When`/`Then` ordering,
//! uniform step indentation, and blank-line separation between the
//! arrange, act and assert blocks of a scenario.
//!
//! This crate is the library facade: it composes the parser
//! (`cuke-lint-parser`) and the rule engine (`cuke-lint-core`) into a
//! file- and directory-level [`Linter`].
//!
//! ## Example
//!
//! ```ignore
//! use cuke_lint::Linter;
//!
//! let linter = Linter::new();
//! let results = linter.lint_paths(&[PathBuf::from("features")])?;
//! if results.has_findings() {
//!     for file in &results.files {
//!         for finding in &file.findings {
//!             eprintln!("{finding}");
//!         }
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod runner;

pub use cuke_lint_core::{
    Background, Comment, Config, ConfigError, DataTable, Document, Engine, FeatureChild, Finding,
    Location, Scenario, Step, StepKeyword, TableRow, Tag, DEFAULT_ALLOWED_TAGS,
};
pub use cuke_lint_parser::{parse, ParseError};
pub use runner::{FileFindings, LintResults, Linter, LinterBuilder, RunnerError};
