use std::path::PathBuf;

use super::super::exit_status::ExitStatus;
use crate::core::Diagnostic;

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub files_scanned: usize,
    pub unit_count: usize,
    /// Where the updates went; `None` means stdout.
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running lexid commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        let init_failed = matches!(
            self.summary,
            CommandSummary::Init(InitSummary { created: false })
        );
        if init_failed || !self.errors.is_empty() {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
