//! File-level extraction.
//!
//! One [`FileExtractor`] walks one parsed module. Its output is private to
//! the file and merged by the caller.
//!
//! ## Module Structure
//!
//! - `file_extractor`: The single-pass visitor (scopes, translator calls, call-context rule)
//! - `scope`: Function-scope stack for translator bindings and async-ness

pub mod file_extractor;
pub mod scope;


pub use file_extractor::FileExtractor;
pub use scope::{FunctionKind, ScopeStack};
