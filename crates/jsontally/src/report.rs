//! Aggregated validation results across one or more documents
//!
//! Loading several configuration files usually wants every problem at once
//! rather than the first one. Callers record unread paths and errors per
//! document here, then turn the report into a single error.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{JsonTallyError, Result};
use crate::visit::Visited;

/// Problems found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentReport {
    /// File the document was loaded from, if any
    pub source: Option<PathBuf>,
    /// Paths declared in the document but never read
    pub never_visited: BTreeSet<String>,
    /// Messages of errors raised while reading the document
    pub errors: Vec<String>,
}

impl DocumentReport {
    fn is_empty(&self) -> bool {
        self.never_visited.is_empty() && self.errors.is_empty()
    }
}

/// Unread paths and errors collected across documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    documents: Vec<DocumentReport>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record unread paths for the document loaded from `source`.
    pub fn record_unread(&mut self, source: Option<&Path>, paths: BTreeSet<String>) {
        if paths.is_empty() {
            return;
        }
        self.document(source).never_visited.extend(paths);
    }

    /// Sweep `tree` and record whatever it never read.
    pub fn record_tree(&mut self, source: Option<&Path>, tree: &impl Visited) {
        self.record_unread(source, tree.never_visited());
    }

    /// Record an error raised while reading the document loaded from `source`.
    pub fn record_error(&mut self, source: Option<&Path>, error: &JsonTallyError) {
        self.document(source).errors.push(error.to_string());
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.documents.iter().all(DocumentReport::is_empty)
    }

    /// Per-document results, in the order documents were first recorded.
    pub fn documents(&self) -> &[DocumentReport] {
        &self.documents
    }

    /// Every unread path across all documents.
    pub fn never_visited(&self) -> BTreeSet<&str> {
        self.documents
            .iter()
            .flat_map(|doc| doc.never_visited.iter().map(String::as_str))
            .collect()
    }

    /// `Ok(())` if empty, otherwise [`JsonTallyError::Invalid`] carrying this report.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(JsonTallyError::Invalid(self))
        }
    }

    fn document(&mut self, source: Option<&Path>) -> &mut DocumentReport {
        let position = self
            .documents
            .iter()
            .position(|doc| doc.source.as_deref() == source);
        let index = match position {
            Some(index) => index,
            None => {
                self.documents.push(DocumentReport {
                    source: source.map(Path::to_path_buf),
                    ..Default::default()
                });
                self.documents.len() - 1
            }
        };
        &mut self.documents[index]
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failing: Vec<_> = self.documents.iter().filter(|doc| !doc.is_empty()).collect();
        write!(f, "invalid JSON in {} document(s)", failing.len())?;
        for doc in failing {
            if let Some(source) = &doc.source {
                write!(f, "\nJSON file: {}", source.display())?;
            }
            for error in &doc.errors {
                write!(f, "\nError: {}", error)?;
            }
            for path in &doc.never_visited {
                write!(f, "\nInvalid attribute: {}", path)?;
            }
        }
        Ok(())
    }
}
