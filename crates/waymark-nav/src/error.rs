//! Error types for sidebar loading, validation, and resolution.
//!
//! Validation never stops at the first problem: a whole pass over the
//! document collects every offending node into a [`ValidationReport`], so a
//! configuration author can fix the complete list at once.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// What is wrong with one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The same document id appears more than once in one sidebar.
    DuplicateId {
        /// The repeated id.
        id: String,
    },
    /// A category has an empty `items` list.
    EmptyCategory {
        /// The category's label.
        label: String,
    },
    /// A node is neither a valid id shorthand nor a valid `doc`/`category`
    /// object.
    MalformedNode {
        /// Human-readable reason.
        reason: String,
    },
    /// A document reference does not exist in the document index.
    UnknownDocument {
        /// The unresolved id.
        id: String,
    },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::DuplicateId { id } => write!(f, "duplicate document id `{id}`"),
            IssueKind::EmptyCategory { label } => {
                write!(f, "category `{label}` has no items")
            }
            IssueKind::MalformedNode { reason } => write!(f, "malformed node: {reason}"),
            IssueKind::UnknownDocument { id } => write!(f, "unknown document id `{id}`"),
        }
    }
}

/// One problem found at one position in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Where the node lives: a sidebar name, or a chrome area such as
    /// `navbar`.
    pub scope: String,
    /// Position within the scope, e.g. `[1].items[0]`. Empty for problems
    /// with the scope as a whole.
    pub path: String,
    /// What is wrong.
    pub kind: IssueKind,
}

impl Issue {
    pub fn new(scope: impl Into<String>, path: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            scope: scope.into(),
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}: {}", self.scope, self.path, self.kind)
    }
}

/// Every problem found in one validation pass, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<Issue>,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one issue.
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Append all issues from another report.
    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    /// All recorded issues, in the order they were found.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Ids of every [`IssueKind::UnknownDocument`] issue, in order.
    #[must_use]
    pub fn unknown_ids(&self) -> Vec<&str> {
        self.issues
            .iter()
            .filter_map(|issue| match &issue.kind {
                IssueKind::UnknownDocument { id } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// `Ok(())` when no issues were recorded, otherwise
    /// [`SidebarError::Invalid`] carrying the report.
    pub fn into_result(self) -> Result<(), SidebarError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(SidebarError::Invalid(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.issues.len() == 1 {
            "problem"
        } else {
            "problems"
        };
        write!(f, "{} {noun} in sidebars configuration:", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

impl From<Vec<Issue>> for ValidationReport {
    fn from(issues: Vec<Issue>) -> Self {
        Self { issues }
    }
}

/// Error from loading or resolving a sidebars document.
#[derive(Debug, Error)]
pub enum SidebarError {
    /// The sidebars file could not be read.
    #[error("Failed to read sidebars file {path}: {source}")]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("Invalid JSON in sidebars document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML.
    #[error("Invalid YAML in sidebars document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parses but its top-level shape is wrong.
    #[error("Invalid sidebars document: {0}")]
    Document(String),

    /// The envelope names a schema revision this build does not know.
    #[error("Unsupported sidebars schema revision {0} (supported: 1, 2)")]
    UnsupportedSchema(u64),

    /// The document violates the tree invariants; the report lists every
    /// offending node.
    #[error("{0}")]
    Invalid(ValidationReport),
}

impl SidebarError {
    /// The validation report, when this error carries one.
    #[must_use]
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            SidebarError::Invalid(report) => Some(report),
            _ => None,
        }
    }
}
