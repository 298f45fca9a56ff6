//! Translation units ("updates"): the extraction core's only output contract.
//!
//! Wire shape (camelCase JSON):
//!
//! ```json
//! {
//!   "dataFormat": "JSX",
//!   "source": { "type": "fragment", "children": ["Welcome"] },
//!   "metadata": { "hash": "…64 hex…", "id": "greeting", "filePaths": ["a.tsx"] }
//! }
//! ```

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::canonical::canonicalize;
use super::hash::hash_source;
use super::markup::MarkupNode;

/// Encoding of a unit's source content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataFormat {
    /// A markup tree from a translation scope.
    Jsx,
    /// An ICU MessageFormat string.
    Icu,
    I18next,
    /// A plain string with no placeholder syntax.
    String,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Jsx => "JSX",
            DataFormat::Icu => "ICU",
            DataFormat::I18next => "I18NEXT",
            DataFormat::String => "STRING",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The content of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UnitSource {
    Markup(MarkupNode),
    Message(String),
}

impl UnitSource {
    /// Canonical JSON value that is hashed and sent over the wire.
    pub fn to_json(&self) -> Value {
        match self {
            UnitSource::Markup(node) => node.to_json(),
            UnitSource::Message(message) => Value::String(message.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitMetadata {
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Provenance: originating files in first-seen order, no duplicates.
    pub file_paths: IndexSet<String>,
}

/// One extracted, hashable piece of content plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationUnit {
    pub data_format: DataFormat,
    pub source: UnitSource,
    pub metadata: UnitMetadata,
}

impl TranslationUnit {
    /// Build a unit from freshly extracted content.
    ///
    /// Markup is canonicalized first; the hash is computed exactly once,
    /// here.
    pub fn new(
        data_format: DataFormat,
        source: UnitSource,
        id: Option<String>,
        context: Option<String>,
        file_path: &str,
    ) -> Self {
        let source = match source {
            UnitSource::Markup(node) => UnitSource::Markup(canonicalize(&node)),
            message => message,
        };
        let hash = hash_source(
            &source.to_json(),
            context.as_deref(),
            id.as_deref(),
            data_format,
        );
        let mut file_paths = IndexSet::new();
        file_paths.insert(file_path.to_string());

        Self {
            data_format,
            source,
            metadata: UnitMetadata {
                hash,
                id,
                context,
                file_paths,
            },
        }
    }

    pub fn hash(&self) -> &str {
        &self.metadata.hash
    }

    pub fn id(&self) -> Option<&str> {
        self.metadata.id.as_deref()
    }
}
