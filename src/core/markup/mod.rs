//! The typed markup tree extracted from a translation scope.
//!
//! A [`MarkupNode`] tree is the canonical, language-independent shape of one
//! piece of translatable JSX. It is a finite tree: every node owns its
//! children, and the depth equals the nesting depth in the source.
//!
//! ## Module Structure
//!
//! - `builder`: Recursive conversion of swc JSX nodes into `MarkupNode`
//! - `text`: React's JSX whitespace rules for text children

pub mod builder;
pub mod text;

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

pub use builder::MarkupBuilder;

/// What kind of runtime value a variable slot stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKind {
    Variable,
    Number,
    Date,
    Currency,
    /// Build-time constant content (`<Static>`), carried as an opaque payload.
    Static,
}

impl SlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::Variable => "variable",
            SlotKind::Number => "number",
            SlotKind::Date => "date",
            SlotKind::Currency => "currency",
            SlotKind::Static => "static",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CLDR plural categories plus the `singular`/`plural` shorthands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
    Singular,
    Plural,
}

impl PluralCategory {
    /// Parse an attribute name. Names outside the fixed set return `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "zero" => Some(PluralCategory::Zero),
            "one" => Some(PluralCategory::One),
            "two" => Some(PluralCategory::Two),
            "few" => Some(PluralCategory::Few),
            "many" => Some(PluralCategory::Many),
            "other" => Some(PluralCategory::Other),
            "singular" => Some(PluralCategory::Singular),
            "plural" => Some(PluralCategory::Plural),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
            PluralCategory::Singular => "singular",
            PluralCategory::Plural => "plural",
        }
    }
}

/// Source text of a runtime expression (a branch discriminant or plural
/// count). Kept for debugging only; it never reaches the wire form or the
/// hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Opaque(pub String);

impl Opaque {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A placeholder for a value that is never itself translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub kind: SlotKind,
    pub name: String,
    /// True when the name came from a `name` attribute instead of position.
    pub explicit: bool,
    /// Whitespace-normalized source text of a static marker's children.
    pub payload: Option<String>,
}

/// A named-alternative construct selected by a runtime discriminant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub discriminant: Opaque,
    pub options: IndexMap<String, MarkupNode>,
    pub default_content: Option<Box<MarkupNode>>,
}

/// A branch keyed by plural category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plural {
    pub count: Opaque,
    pub forms: IndexMap<PluralCategory, MarkupNode>,
    pub default_content: Option<Box<MarkupNode>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Text(String),
    Element {
        tag: String,
        children: Vec<MarkupNode>,
    },
    Fragment(Vec<MarkupNode>),
    VariableSlot(Slot),
    Branch(Branch),
    Plural(Plural),
}

impl MarkupNode {
    pub fn text(value: impl Into<String>) -> Self {
        MarkupNode::Text(value.into())
    }

    pub fn empty() -> Self {
        MarkupNode::Fragment(Vec::new())
    }

    /// Nesting depth of the tree; leaves have depth 1.
    pub fn depth(&self) -> usize {
        let child_depth = match self {
            MarkupNode::Text(_) | MarkupNode::VariableSlot(_) => 0,
            MarkupNode::Element { children, .. } | MarkupNode::Fragment(children) => {
                children.iter().map(MarkupNode::depth).max().unwrap_or(0)
            }
            MarkupNode::Branch(branch) => branch
                .options
                .values()
                .chain(branch.default_content.as_deref())
                .map(MarkupNode::depth)
                .max()
                .unwrap_or(0),
            MarkupNode::Plural(plural) => plural
                .forms
                .values()
                .chain(plural.default_content.as_deref())
                .map(MarkupNode::depth)
                .max()
                .unwrap_or(0),
        };
        child_depth + 1
    }

    /// Wire form of the node.
    ///
    /// `Text` becomes a bare JSON string; every other node is an object
    /// tagged by `"type"`. Opaque expressions are left out.
    pub fn to_json(&self) -> Value {
        match self {
            MarkupNode::Text(text) => Value::String(text.clone()),
            MarkupNode::Element { tag, children } => json!({
                "type": "element",
                "tag": tag,
                "children": children.iter().map(MarkupNode::to_json).collect::<Vec<_>>(),
            }),
            MarkupNode::Fragment(children) => json!({
                "type": "fragment",
                "children": children.iter().map(MarkupNode::to_json).collect::<Vec<_>>(),
            }),
            MarkupNode::VariableSlot(slot) => {
                let mut obj = Map::new();
                obj.insert("type".into(), "variable".into());
                obj.insert("kind".into(), slot.kind.as_str().into());
                obj.insert("name".into(), slot.name.clone().into());
                obj.insert("explicit".into(), slot.explicit.into());
                if let Some(payload) = &slot.payload {
                    obj.insert("payload".into(), payload.clone().into());
                }
                Value::Object(obj)
            }
            MarkupNode::Branch(branch) => {
                let options: Map<String, Value> = branch
                    .options
                    .iter()
                    .map(|(name, node)| (name.clone(), node.to_json()))
                    .collect();
                let mut obj = Map::new();
                obj.insert("type".into(), "branch".into());
                obj.insert("options".into(), Value::Object(options));
                if let Some(default) = &branch.default_content {
                    obj.insert("default".into(), default.to_json());
                }
                Value::Object(obj)
            }
            MarkupNode::Plural(plural) => {
                let forms: Map<String, Value> = plural
                    .forms
                    .iter()
                    .map(|(category, node)| (category.as_str().to_string(), node.to_json()))
                    .collect();
                let mut obj = Map::new();
                obj.insert("type".into(), "plural".into());
                obj.insert("forms".into(), Value::Object(forms));
                if let Some(default) = &plural.default_content {
                    obj.insert("default".into(), default.to_json());
                }
                Value::Object(obj)
            }
        }
    }
}

impl Serialize for MarkupNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;

    fn slot(kind: SlotKind, name: &str) -> MarkupNode {
        MarkupNode::VariableSlot(Slot {
            kind,
            name: name.to_string(),
            explicit: false,
            payload: None,
        })
    }

    #[test]
    fn test_plural_category_parse() {
        for name in [
            "zero", "one", "two", "few", "many", "other", "singular", "plural",
        ] {
            let category = PluralCategory::parse(name).unwrap();
            assert_eq!(category.as_str(), name);
        }
        assert_eq!(PluralCategory::parse("className"), None);
        assert_eq!(PluralCategory::parse("n"), None);
    }

    #[test]
    fn test_text_serializes_as_string() {
        let node = MarkupNode::text("Hello");
        assert_eq!(serde_json::to_string(&node).unwrap(), "\"Hello\"");
    }

    #[test]
    fn test_slot_serialization() {
        let node = slot(SlotKind::Number, "slot_number_1");
        assert_snapshot!(
            serde_json::to_string(&node).unwrap(),
            @r#"{"type":"variable","kind":"number","name":"slot_number_1","explicit":false}"#
        );
    }

    #[test]
    fn test_branch_excludes_discriminant() {
        let mut options = IndexMap::new();
        options.insert("admin".to_string(), MarkupNode::text("Hi admin"));
        let node = MarkupNode::Branch(Branch {
            discriminant: Opaque("user.role".to_string()),
            options,
            default_content: Some(Box::new(MarkupNode::text("Hi"))),
        });
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("user.role"));
        assert_snapshot!(json, @r#"{"type":"branch","options":{"admin":"Hi admin"},"default":"Hi"}"#);
    }

    #[test]
    fn test_depth() {
        let mut forms = IndexMap::new();
        forms.insert(PluralCategory::One, slot(SlotKind::Variable, "x"));
        let plural = MarkupNode::Plural(Plural {
            count: Opaque::default(),
            forms,
            default_content: None,
        });
        let tree = MarkupNode::Fragment(vec![MarkupNode::text("a"), plural]);
        assert_eq!(tree.depth(), 3);
        assert_eq!(MarkupNode::empty().depth(), 1);
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let mut a = IndexMap::new();
        a.insert(PluralCategory::One, MarkupNode::text("1"));
        a.insert(PluralCategory::Other, MarkupNode::text("n"));
        let mut b = IndexMap::new();
        b.insert(PluralCategory::Other, MarkupNode::text("n"));
        b.insert(PluralCategory::One, MarkupNode::text("1"));

        let left = Plural {
            count: Opaque::default(),
            forms: a,
            default_content: None,
        };
        let right = Plural {
            count: Opaque::default(),
            forms: b,
            default_content: None,
        };
        assert_eq!(left, right);
    }
}
