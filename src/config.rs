use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::ParsingConfig;

pub const CONFIG_FILE_NAME: &str = ".lexidrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    /// Directories (or glob patterns) to scan; empty scans the whole source root.
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default)]
    pub ignore_additional_data: bool,
    #[serde(default)]
    pub ignore_dynamic_content: bool,
    #[serde(default)]
    pub ignore_invalid_icu: bool,
    /// Module specifiers that re-export the translation components.
    #[serde(default)]
    pub extra_modules: Vec<String>,
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/.next/**", "**/dist/**"]
        .map(String::from)
        .to_vec()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: default_ignores(),
            includes: Vec::new(),
            source_root: default_source_root(),
            ignore_test_files: default_ignore_test_files(),
            ignore_additional_data: false,
            ignore_dynamic_content: false,
            ignore_invalid_icu: false,
            extra_modules: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths, so
        // `app/[locale]` is valid without escaping.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        for module in &self.extra_modules {
            if module.trim().is_empty() {
                anyhow::bail!("Empty module specifier in 'extraModules'");
            }
        }

        Ok(())
    }

    /// The extraction flags carried by this config.
    pub fn parsing_config(&self) -> ParsingConfig {
        ParsingConfig {
            ignore_additional_data: self.ignore_additional_data,
            ignore_dynamic_content: self.ignore_dynamic_content,
            ignore_invalid_icu: self.ignore_invalid_icu,
            extra_modules: self.extra_modules.clone(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config came from; `None` when defaults are used.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
