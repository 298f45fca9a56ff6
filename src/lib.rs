//! Lexid - translatable content extractor for JSX/TSX projects
//!
//! Lexid scans React sources for translation scopes (`<T>...</T>`) and
//! translator calls (`t("...")`), turns each piece of content into a
//! content-addressed translation unit, and reports everything that cannot be
//! extracted statically.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (parse, resolve, extract, hash, merge)
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod mcp;
