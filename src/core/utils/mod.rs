//! Utility functions and helpers for the extraction core.
//!
//! ## Module Structure
//!
//! - `ast`: Syntax-tree helpers (static strings, JSX names and attributes, binding patterns)

pub mod ast;

pub use ast::*;
