//! Core data types used across the extraction pipeline.
//!
//! ## Module Structure
//!
//! - `diagnostic`: Structured errors and warnings (`Diagnostic`, `DiagnosticKind`)
//! - `source`: Source code location types (`SourceContext`, `SourceLocation`)

pub mod diagnostic;
pub mod source;

pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticLocation, Severity};
pub use source::{SourceContext, SourceLocation};
