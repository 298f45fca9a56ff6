use std::fs;

use anyhow::{Context, Result};

use super::super::args::ExtractCommand;
use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::core::ExtractContext;

/// Scan, extract, and write the updates JSON array.
///
/// Updates are written even when errors were reported; units whose scope
/// failed are simply absent from the array.
pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let ctx = ExtractContext::new(&args.common)?;
    let output = ctx.output();

    let json = serde_json::to_string_pretty(&output.updates)?;
    match &args.output {
        Some(path) => fs::write(path, format!("{}\n", json))
            .with_context(|| format!("Failed to write updates to {}", path.display()))?,
        None => println!("{}", json),
    }

    Ok(CommandResult {
        summary: CommandSummary::Extract(ExtractSummary {
            files_scanned: ctx.files.len(),
            unit_count: output.updates.len(),
            output: args.output.clone(),
        }),
        errors: output.errors.clone(),
        warnings: output.warnings.iter().cloned().collect(),
    })
}
