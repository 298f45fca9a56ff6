//! Per-file and multi-file extraction entry points.
//!
//! Each file is a pure function of `(source, config)` producing a private
//! [`ParsingOutput`]. Files run in parallel on the rayon pool; the outputs are
//! appended in sorted path order and merged once at the end, so the result
//! does not depend on scheduling.

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use swc_common::{FilePathMapping, SourceMap};

use crate::core::data::{Diagnostic, DiagnosticKind};
use crate::core::extract::FileExtractor;
use crate::core::output::ParsingOutput;
use crate::core::parsers::parse_jsx_source;
use crate::core::parsing_config::ParsingConfig;
use crate::core::symbols::SymbolTable;

/// Extract one file's units. A parse failure becomes one file-level error.
pub fn extract_source(
    file_path: &str,
    code: String,
    config: &ParsingConfig,
    source_map: Arc<SourceMap>,
) -> ParsingOutput {
    let unit = match parse_jsx_source(code, file_path, source_map) {
        Ok(unit) => unit,
        Err(err) => {
            let mut output = ParsingOutput::new();
            output.push_error(Diagnostic::file(
                DiagnosticKind::ParseError,
                file_path,
                err.to_string(),
            ));
            return output;
        }
    };
    let symbols = SymbolTable::build(&unit.module, &config.extra_modules);
    FileExtractor::new(&unit, &symbols, config).extract()
}

/// Extract in-memory sources `(path, code)` and merge the results.
pub fn extract_sources(sources: Vec<(String, String)>, config: &ParsingConfig) -> ParsingOutput {
    let mut sources = sources;
    sources.sort_by(|a, b| a.0.cmp(&b.0));

    let source_map = Arc::new(SourceMap::new(FilePathMapping::empty()));
    let outputs: Vec<ParsingOutput> = sources
        .into_par_iter()
        .map(|(path, code)| extract_source(&path, code, config, Arc::clone(&source_map)))
        .collect();
    merge_outputs(outputs)
}

/// Read and extract files given relative to `source_root`.
///
/// A file that cannot be read is reported like a parse failure; sibling
/// files proceed.
pub fn extract_files(
    source_root: &Path,
    files: &[String],
    config: &ParsingConfig,
) -> ParsingOutput {
    let mut files: Vec<&String> = files.iter().collect();
    files.sort();

    let source_map = Arc::new(SourceMap::new(FilePathMapping::empty()));
    let outputs: Vec<ParsingOutput> = files
        .into_par_iter()
        .map(|path| match std::fs::read_to_string(source_root.join(path)) {
            Ok(code) => extract_source(path, code, config, Arc::clone(&source_map)),
            Err(err) => {
                let mut output = ParsingOutput::new();
                output.push_error(Diagnostic::file(
                    DiagnosticKind::ParseError,
                    path.as_str(),
                    format!("failed to read file: {}", err),
                ));
                output
            }
        })
        .collect();
    merge_outputs(outputs)
}

fn merge_outputs(outputs: Vec<ParsingOutput>) -> ParsingOutput {
    let mut merged = ParsingOutput::new();
    for output in outputs {
        merged.append(output);
    }
    merged.merge_updates();
    merged
}
