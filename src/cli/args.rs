//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Scan sources and emit translation units
//! - `init`: Initialize lexid configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

/// Arguments shared by everything that runs an extraction.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Warn instead of fail on dynamic `id`/`context` values
    #[arg(long)]
    pub ignore_additional_data: bool,

    /// Silently skip dynamic content inside translation scopes
    #[arg(long)]
    pub ignore_dynamic_content: bool,

    /// Warn instead of fail on invalid ICU messages
    #[arg(long)]
    pub ignore_invalid_icu: bool,

    /// Extra module treated like the built-in translation modules.
    /// Can be specified multiple times: --extra-module @/i18n --extra-module ~/gt
    #[arg(long = "extra-module", value_name = "MODULE")]
    pub extra_modules: Vec<String>,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write the updates JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable content into hashed translation units
    Extract(ExtractCommand),
    /// Initialize a new .lexidrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
