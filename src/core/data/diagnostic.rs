//! Structured diagnostics produced while extracting translation units.
//!
//! Diagnostics never abort a scan. They are accumulated in a
//! [`ParsingOutput`](crate::core::ParsingOutput): errors in an ordered list,
//! warnings in an insertion-ordered set so that the same issue reported twice
//! collapses into one entry. Equality is structural (`kind` + location +
//! message), so two distinct issues that happen to print alike still stay
//! apart.

use std::fmt;

use serde::{Serialize, Serializer};

use super::source::SourceContext;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticKind {
    /// The file could not be read or parsed. Fatal for that file only.
    ParseError,
    /// An arbitrary expression inside a translation scope.
    NonStaticContent,
    /// A template literal with `${...}` inside a translation scope.
    TemplateLiteralWithInterpolation,
    /// A sync accessor called from an async function, or the reverse.
    AsyncSyncRuleViolation,
    /// `id`/`context` that is not a static string.
    NonStaticMetadata,
    /// A translatable string that is not valid ICU MessageFormat.
    InvalidIcu,
    /// A translation scope nested inside another one.
    NestedTranslationScope,
    /// A branch or plural construct without any usable option.
    EmptyConstruct,
    /// A variable slot wrapping more than one child.
    AmbiguousSlot,
    /// One explicit id used for different content.
    DuplicateId,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::ParseError => write!(f, "parse-error"),
            DiagnosticKind::NonStaticContent => write!(f, "non-static-content"),
            DiagnosticKind::TemplateLiteralWithInterpolation => {
                write!(f, "template-interpolation")
            }
            DiagnosticKind::AsyncSyncRuleViolation => write!(f, "async-sync-rule"),
            DiagnosticKind::NonStaticMetadata => write!(f, "non-static-metadata"),
            DiagnosticKind::InvalidIcu => write!(f, "invalid-icu"),
            DiagnosticKind::NestedTranslationScope => write!(f, "nested-scope"),
            DiagnosticKind::EmptyConstruct => write!(f, "empty-construct"),
            DiagnosticKind::AmbiguousSlot => write!(f, "ambiguous-slot"),
            DiagnosticKind::DuplicateId => write!(f, "duplicate-id"),
        }
    }
}

/// Where a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticLocation {
    /// A position inside a source file.
    Source(SourceContext),
    /// A whole file (parse failures, cross-file conflicts).
    File { path: String },
}

impl DiagnosticLocation {
    pub fn file_path(&self) -> &str {
        match self {
            DiagnosticLocation::Source(ctx) => ctx.file_path(),
            DiagnosticLocation::File { path } => path,
        }
    }

    /// `(line, col)`, or `(0, 0)` for file-level locations.
    pub fn position(&self) -> (usize, usize) {
        match self {
            DiagnosticLocation::Source(ctx) => (ctx.line(), ctx.col()),
            DiagnosticLocation::File { .. } => (0, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: DiagnosticLocation,
    pub message: String,
}

impl Diagnostic {
    pub fn at(kind: DiagnosticKind, context: SourceContext, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: DiagnosticLocation::Source(context),
            message: message.into(),
        }
    }

    pub fn file(kind: DiagnosticKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: DiagnosticLocation::File { path: path.into() },
            message: message.into(),
        }
    }

    pub fn file_path(&self) -> &str {
        self.location.file_path()
    }

    /// The source line for caret display, if the diagnostic points into a file.
    pub fn source_line(&self) -> Option<&str> {
        match &self.location {
            DiagnosticLocation::Source(ctx) => Some(&ctx.source_line),
            DiagnosticLocation::File { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            DiagnosticLocation::Source(ctx) => write!(
                f,
                "{}: {} [{}]",
                ctx.location, self.message, self.kind
            ),
            DiagnosticLocation::File { path } => {
                write!(f, "{}: {} [{}]", path, self.message, self.kind)
            }
        }
    }
}

/// Diagnostics travel over the wire as their rendered string.
impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::SourceLocation;

    fn context(line: usize, col: usize) -> SourceContext {
        SourceContext::new(SourceLocation::new("src/app.tsx", line, col), "<T>{x}</T>")
    }

    #[test]
    fn test_display_source_location() {
        let diag = Diagnostic::at(
            DiagnosticKind::NonStaticContent,
            context(3, 8),
            "dynamic content `x` inside <T>",
        );
        assert_eq!(
            diag.to_string(),
            "src/app.tsx:3:8: dynamic content `x` inside <T> [non-static-content]"
        );
    }

    #[test]
    fn test_display_file_location() {
        let diag = Diagnostic::file(DiagnosticKind::ParseError, "src/bad.tsx", "failed to parse");
        assert_eq!(diag.to_string(), "src/bad.tsx: failed to parse [parse-error]");
        assert_eq!(diag.location.position(), (0, 0));
        assert!(diag.source_line().is_none());
    }

    #[test]
    fn test_structural_equality() {
        let a = Diagnostic::at(DiagnosticKind::EmptyConstruct, context(1, 1), "msg");
        let b = Diagnostic::at(DiagnosticKind::EmptyConstruct, context(1, 1), "msg");
        let c = Diagnostic::at(DiagnosticKind::AmbiguousSlot, context(1, 1), "msg");

        let set: HashSet<_> = [a.clone(), b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
    }

    #[test]
    fn test_serialize_as_string() {
        let diag = Diagnostic::file(DiagnosticKind::DuplicateId, "a.tsx", "conflict");
        let json = serde_json::to_string(&diag).unwrap();
        assert_eq!(json, "\"a.tsx: conflict [duplicate-id]\"");
    }
}
