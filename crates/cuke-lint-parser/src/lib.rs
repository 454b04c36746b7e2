//! # cuke-lint-parser
//!
//! A line-oriented parser turning raw `.feature` text into the
//! [`cuke_lint_core::Document`] model the rule engine consumes.
//!
//! Gherkin is line-regular: every construct the linter cares about
//! (tags, feature/background/scenario headers, steps, table rows,
//! comments, doc strings) starts a line. The parser is therefore a
//! single forward scan with a small amount of block state, tracking
//! 1-based line and column positions throughout.
//!
//! Parsing either yields exactly one document or a terminal
//! [`ParseError`] carrying a message and the offending line; the caller
//! converts the latter into a single finding and skips rule evaluation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod keyword;
mod parser;

pub use parser::{parse, ParseError};
