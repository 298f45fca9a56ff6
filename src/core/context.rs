use std::{
    cell::OnceCell,
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::Result;
use colored::Colorize;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{ParsingConfig, ParsingOutput, file_scanner::scan_files, pipeline::extract_files},
};

/// Orchestrates one extraction run.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--ignore-dynamic-content`)
/// 2. `.lexidrc.json` config file
/// 3. Built-in defaults
///
/// Extraction itself runs lazily on the first call to [`output`](Self::output).
pub struct ExtractContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Directory that scanned paths are relative to.
    pub root_dir: PathBuf,

    /// Source files to extract from, relative to `root_dir`.
    pub files: BTreeSet<String>,

    pub verbose: bool,

    output: OnceCell<ParsingOutput>,
}

impl ExtractContext {
    /// Load config, apply CLI overrides and scan the source tree.
    ///
    /// # Errors
    ///
    /// Returns error if the config file cannot be read or is invalid.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let search_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let config_result = load_config(&search_dir)?;

        if verbose {
            match &config_result.path {
                Some(path) => eprintln!(
                    "{} Using config {}",
                    "note:".bold().cyan(),
                    path.display()
                ),
                None => eprintln!(
                    "{} No .lexidrc.json found, using default configuration",
                    "note:".bold().cyan()
                ),
            }
        }

        // An explicit --source-root wins; otherwise `sourceRoot` is relative
        // to the config file's directory.
        let root_dir = match (&common_args.source_root, &config_result.path) {
            (Some(root), _) => root.clone(),
            (None, Some(config_path)) => {
                let config_dir = config_path.parent().unwrap_or(Path::new("."));
                config_dir.join(&config_result.config.source_root)
            }
            (None, None) => PathBuf::from(&config_result.config.source_root),
        };

        let mut config = config_result.config;
        apply_overrides(&mut config, common_args);

        let scan_result = scan_files(
            &root_dir,
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
            verbose,
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }
        if verbose {
            eprintln!(
                "{} Scanning {} file(s) under {}",
                "note:".bold().cyan(),
                scan_result.files.len(),
                root_dir.display()
            );
        }

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            verbose,
            output: OnceCell::new(),
        })
    }

    pub fn parsing_config(&self) -> ParsingConfig {
        self.config.parsing_config()
    }

    /// Extraction result for all scanned files (computed once).
    pub fn output(&self) -> &ParsingOutput {
        self.output.get_or_init(|| {
            let files: Vec<String> = self.files.iter().cloned().collect();
            extract_files(&self.root_dir, &files, &self.parsing_config())
        })
    }
}

/// CLI flags can only switch behavior on; they never turn a config flag off.
fn apply_overrides(config: &mut Config, args: &CommonArgs) {
    config.ignore_additional_data |= args.ignore_additional_data;
    config.ignore_dynamic_content |= args.ignore_dynamic_content;
    config.ignore_invalid_icu |= args.ignore_invalid_icu;
    for module in &args.extra_modules {
        if !config.extra_modules.contains(module) {
            config.extra_modules.push(module.clone());
        }
    }
}
