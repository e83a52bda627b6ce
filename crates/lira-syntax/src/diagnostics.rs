//! Node-scoped diagnostics.
//!
//! Diagnostics are stored position-free on green nodes and tokens so a
//! subtree keeps its diagnostics when it is reused at a different offset.
//! Absolute ranges are attached only on export, by walking the facade tree.

use text_size::TextRange;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic scoped to the node it is attached to.
///
/// The message must not embed absolute positions; those are derived from the
/// facade tree when the diagnostic is exported.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    message: Box<str>,
}

impl Diagnostic {
    pub fn error(message: impl Into<Box<str>>) -> Self {
        Self { severity: Severity::Error, message: message.into() }
    }

    pub fn warning(message: impl Into<Box<str>>) -> Self {
        Self { severity: Severity::Warning, message: message.into() }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A diagnostic tagged with its absolute source range, in source order.
///
/// Produced by [`crate::SyntaxTree::diagnostics`] and consumed by reporters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceDiagnostic {
    severity: Severity,
    message: Box<str>,
    range: TextRange,
}

impl SourceDiagnostic {
    pub(crate) fn new(diagnostic: &Diagnostic, range: TextRange) -> Self {
        Self { severity: diagnostic.severity, message: diagnostic.message.clone(), range }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }
}
