//! Extraction engine.
//!
//! Turns source files into translation units ("updates") plus diagnostics:
//!
//! 1. **Parse**: `parsers` builds a module AST per file.
//! 2. **Resolve**: `symbols` maps local names to translation capabilities.
//! 3. **Extract**: `extract` walks the AST; `markup` builds the content tree
//!    of each translation scope; `icu` validates translator strings.
//! 4. **Identify**: `canonical` normalizes markup and `hash` fingerprints it
//!    into a [`TranslationUnit`].
//! 5. **Merge**: `pipeline` runs files in parallel and folds the per-file
//!    [`ParsingOutput`]s together in a deterministic order.

pub mod canonical;
pub mod context;
pub mod data;
pub mod extract;
pub mod file_scanner;
pub mod hash;
pub mod icu;
pub mod markup;
pub mod output;
pub mod parsers;
pub mod parsing_config;
pub mod pipeline;
pub mod symbols;
pub mod unit;
pub mod utils;

pub use context::ExtractContext;
pub use data::{
    Diagnostic, DiagnosticKind, DiagnosticLocation, Severity, SourceContext, SourceLocation,
};
pub use output::ParsingOutput;
pub use parsing_config::ParsingConfig;
pub use pipeline::{extract_files, extract_source, extract_sources};
pub use unit::{DataFormat, TranslationUnit, UnitSource};
