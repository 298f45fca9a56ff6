use serde::Serialize;

/// Immutable per-scan extraction flags.
///
/// Built once per invocation (from the config file plus CLI overrides) and
/// only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsingConfig {
    /// Drop dynamic `id`/`context` with a warning instead of failing the unit.
    pub ignore_additional_data: bool,
    /// Silently skip dynamic content instead of reporting it.
    pub ignore_dynamic_content: bool,
    /// Report invalid ICU as a warning and skip the string.
    pub ignore_invalid_icu: bool,
    /// Module specifiers treated like the canonical translation sources.
    pub extra_modules: Vec<String>,
}
