//! File- and directory-level lint orchestration.

use cuke_lint_core::{Config, Engine, Finding};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while locating or reading feature files.
///
/// These are hard errors, distinct from lint findings: a missing or
/// unreadable input is the caller's mistake, not a property of a feature
/// file.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A path argument that is neither a file nor a directory.
    #[error("Could not find '{0}'")]
    NotFound(PathBuf),

    /// IO error reading a feature file.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Error walking a directory.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),
}

/// Builder for configuring a [`Linter`].
#[derive(Debug, Default)]
pub struct LinterBuilder {
    config: Option<Config>,
    exclude_patterns: Vec<String>,
}

impl LinterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Builds the linter.
    #[must_use]
    pub fn build(self) -> Linter {
        let config = self.config.unwrap_or_default();

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.discovery.exclude.clone());

        Linter {
            engine: Engine::with_allowed_tags(config.allowed_tags()),
            exclude_patterns,
            respect_gitignore: config.discovery.respect_gitignore,
        }
    }
}

/// Lints feature files and directories of feature files.
///
/// Composes the parser and the rule engine: a file that fails to parse
/// yields its parse error as the file's single finding; a parsed file
/// yields whatever the engine reports. The engine itself is pure, so one
/// `Linter` can be shared freely.
#[derive(Debug)]
pub struct Linter {
    engine: Engine,
    exclude_patterns: Vec<String>,
    respect_gitignore: bool,
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

impl Linter {
    /// Creates a linter with default configuration.
    #[must_use]
    pub fn new() -> Self {
        LinterBuilder::new().build()
    }

    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// The rule engine this linter runs.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Lints feature source text under the given uri.
    ///
    /// A parse error short-circuits rule evaluation and becomes the single
    /// finding for the file.
    #[must_use]
    pub fn lint_source(&self, uri: &str, source: &str) -> Vec<Finding> {
        match cuke_lint_parser::parse(uri, source) {
            Ok(document) => self.engine.lint_document(&document),
            Err(error) => {
                debug!(uri, %error, "parse error");
                vec![Finding::new(error.to_string(), uri).with_line_opt(error.line())]
            }
        }
    }

    /// Lints a single feature file.
    ///
    /// # Errors
    ///
    /// Returns a [`RunnerError`] if the file cannot be read.
    pub fn lint_file(&self, path: &Path) -> Result<Vec<Finding>, RunnerError> {
        let source = std::fs::read_to_string(path).map_err(|e| RunnerError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(self.lint_source(&path.display().to_string(), &source))
    }

    /// Lints every feature file reachable from the given paths.
    ///
    /// Directory arguments are walked recursively for `*.feature` files in
    /// sorted order; file arguments are linted as-is.
    ///
    /// # Errors
    ///
    /// Returns a [`RunnerError`] if a path does not exist, a file cannot
    /// be read, or a directory walk fails.
    pub fn lint_paths(&self, paths: &[PathBuf]) -> Result<LintResults, RunnerError> {
        let mut feature_files = Vec::new();

        for path in paths {
            if path.is_dir() {
                feature_files.extend(self.discover(path)?);
            } else if path.is_file() {
                feature_files.push(path.clone());
            } else {
                return Err(RunnerError::NotFound(path.clone()));
            }
        }

        info!("Linting {} feature file(s)", feature_files.len());

        let mut results = LintResults::new();
        for file in feature_files {
            let findings = self.lint_file(&file)?;
            debug!(file = %file.display(), findings = findings.len(), "linted");
            results.files.push(FileFindings { file, findings });
        }

        Ok(results)
    }

    /// Discovers `*.feature` files under a directory, sorted for
    /// deterministic output.
    fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>, RunnerError> {
        let mut files = Vec::new();

        let mut builder = ignore::WalkBuilder::new(dir);
        builder
            .git_ignore(self.respect_gitignore)
            .require_git(false);

        for entry in builder.build() {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.into_path();
            if path.extension().map_or(true, |ext| ext != "feature") {
                continue;
            }
            if self.is_excluded(&path) {
                debug!(path = %path.display(), "excluded");
                continue;
            }
            files.push(path);
        }

        files.sort();
        Ok(files)
    }

    /// Checks a path against the exclude glob patterns.
    fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/fixtures/**".
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty() && path_str.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }
}

/// Findings for one feature file.
#[derive(Debug, Clone, Serialize)]
pub struct FileFindings {
    /// The linted file.
    pub file: PathBuf,
    /// Findings in document order. Empty means the file is clean.
    pub findings: Vec<Finding>,
}

/// Aggregated lint results across all linted files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintResults {
    /// Per-file findings, in lint order.
    pub files: Vec<FileFindings>,
}

impl LintResults {
    /// Creates an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any file has at least one finding.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        self.files.iter().any(|f| !f.findings.is_empty())
    }

    /// Total number of findings across all files.
    #[must_use]
    pub fn total_findings(&self) -> usize {
        self.files.iter().map(|f| f.findings.len()).sum()
    }

    /// Number of files that were linted.
    #[must_use]
    pub fn files_checked(&self) -> usize {
        self.files.len()
    }
}
