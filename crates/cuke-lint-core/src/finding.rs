//! The structured lint result type.

use serde::{Deserialize, Serialize};

/// A single lint finding for a feature file.
///
/// Findings have no identity beyond their contents; they are never merged
/// or deduplicated. The JSON shape (`camelCase` keys, explicit nulls)
/// matches what downstream report consumers already parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Human-readable description of the problem.
    pub message: String,
    /// Identifier of the file the finding belongs to.
    pub file: String,
    /// 1-based line number, when the finding points at a specific line.
    pub line: Option<usize>,
    /// Canonical path override; falls back to `file` when absent.
    pub file_path: Option<String>,
    /// Remediation hint. Embedded line breaks are rendered as separate
    /// bullets by reporters.
    pub tip: Option<String>,
}

impl Finding {
    /// Creates a new finding without a line, path override or tip.
    #[must_use]
    pub fn new(message: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file: file.into(),
            line: None,
            file_path: None,
            tip: None,
        }
    }

    /// Sets the line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Sets the line number from an optional value.
    #[must_use]
    pub fn with_line_opt(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    /// Sets the canonical path override.
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Sets the remediation tip.
    #[must_use]
    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    /// The canonical path of this finding, defaulting to `file`.
    #[must_use]
    pub fn file_path(&self) -> &str {
        self.file_path.as_deref().unwrap_or(&self.file)
    }

    /// Returns a copy of this finding with the tip removed.
    #[must_use]
    pub fn without_tip(self) -> Self {
        Self { tip: None, ..self }
    }

    /// The tip split into individual remediation lines.
    pub fn tip_lines(&self) -> impl Iterator<Item = &str> {
        self.tip.as_deref().unwrap_or_default().lines()
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.file, line, self.message),
            None => write!(f, "{}: {}", self.file, self.message),
        }
    }
}
