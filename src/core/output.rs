//! Update collection and deduplication.
//!
//! Each file's extraction produces a private [`ParsingOutput`]. The
//! orchestrator appends them in a fixed order and then runs
//! [`ParsingOutput::merge_updates`] once, single-threaded, which folds units
//! with equal hashes together and unions their provenance.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use super::data::{Diagnostic, DiagnosticKind};
use super::unit::TranslationUnit;

/// Accumulator threaded through one scan.
#[derive(Debug, Default, Serialize)]
pub struct ParsingOutput {
    pub updates: Vec<TranslationUnit>,
    pub errors: Vec<Diagnostic>,
    /// Soft issues; identical diagnostics collapse.
    pub warnings: IndexSet<Diagnostic>,
}

impl ParsingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_update(&mut self, unit: TranslationUnit) {
        self.updates.push(unit);
    }

    pub fn push_error(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    pub fn push_warning(&mut self, diagnostic: Diagnostic) {
        self.warnings.insert(diagnostic);
    }

    /// Append another output (typically one file's) after this one.
    pub fn append(&mut self, other: ParsingOutput) {
        self.updates.extend(other.updates);
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Merge updates by hash and report ids reused for different content.
    pub fn merge_updates(&mut self) {
        let updates = std::mem::take(&mut self.updates);
        self.updates = merge_updates(updates);
        for conflict in find_id_conflicts(&self.updates) {
            self.errors.push(conflict);
        }
    }
}

/// Fold units with equal `metadata.hash` together.
///
/// The first-seen unit is kept as the representative. Duplicates only
/// contribute their file paths, appended in the order they were first
/// observed, without repeats.
pub fn merge_updates(updates: Vec<TranslationUnit>) -> Vec<TranslationUnit> {
    let mut merged: IndexMap<String, TranslationUnit> = IndexMap::with_capacity(updates.len());
    for unit in updates {
        match merged.get_mut(unit.hash()) {
            Some(existing) => {
                existing
                    .metadata
                    .file_paths
                    .extend(unit.metadata.file_paths);
            }
            None => {
                merged.insert(unit.metadata.hash.clone(), unit);
            }
        }
    }
    merged.into_values().collect()
}

/// One error per explicit id that maps to more than one hash.
///
/// Both units are kept: the hash is the translation key, so neither side
/// can silently win.
pub fn find_id_conflicts(updates: &[TranslationUnit]) -> Vec<Diagnostic> {
    let mut by_id: IndexMap<&str, Vec<&TranslationUnit>> = IndexMap::new();
    for unit in updates {
        if let Some(id) = unit.id() {
            by_id.entry(id).or_default().push(unit);
        }
    }

    by_id
        .into_iter()
        .filter(|(_, units)| units.len() > 1)
        .map(|(id, units)| {
            let first = units[0];
            let sides = units
                .iter()
                .map(|u| {
                    format!(
                        "({})",
                        u.metadata
                            .file_paths
                            .iter()
                            .cloned()
                            .collect::<Vec<_>>()
                            .join(", ")
                    )
                })
                .collect::<Vec<_>>()
                .join(" vs ");
            let path = first
                .metadata
                .file_paths
                .first()
                .cloned()
                .unwrap_or_default();
            Diagnostic::file(
                DiagnosticKind::DuplicateId,
                path,
                format!("duplicate id \"{}\" maps to different content {}", id, sides),
            )
        })
        .collect()
}
