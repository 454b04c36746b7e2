//! # cuke-lint-core
//!
//! Core types and the rule evaluation engine for linting Cucumber/Behat
//! feature files.
//!
//! This crate is deliberately free of I/O: it receives an already-parsed
//! [`Document`] and produces an ordered list of [`Finding`]s. Parsing raw
//! feature text, file discovery and report formatting live in the
//! `cuke-lint-parser` and `cuke-lint` crates.
//!
//! ## Example
//!
//! ```ignore
//! use cuke_lint_core::Engine;
//!
//! let engine = Engine::new();
//! let findings = engine.lint_document(&document);
//! for finding in &findings {
//!     println!("{finding}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod document;
mod engine;
mod finding;

pub use config::{Config, ConfigError, DiscoveryConfig, TagsConfig};
pub use document::{
    Background, Comment, DataTable, Document, FeatureChild, Location, Scenario, Step, StepKeyword,
    TableRow, Tag,
};
pub use engine::{Engine, DEFAULT_ALLOWED_TAGS};
pub use finding::Finding;
