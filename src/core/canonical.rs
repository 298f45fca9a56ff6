//! Canonicalization of markup trees.
//!
//! Structurally equivalent encodings are rewritten into one normal form
//! before hashing:
//!
//! 1. **Select-to-argument collapse**: a `Branch` whose every option (and
//!    default content, if any) is the same single variable slot is just that
//!    slot. Slots are compared by name, so only explicitly named slots
//!    collapse; positional ones (`slot_variable_1`, `slot_variable_2`) never
//!    match each other.
//! 2. **Text coalescing**: inside children lists, empty text is dropped and
//!    adjacent text nodes are merged (`Hello {"world"}` equals `Hello world`).
//!
//! The pass works bottom-up and is idempotent. Static marker payloads are
//! opaque strings and are never rewritten.

use indexmap::IndexMap;

use super::markup::{Branch, MarkupNode, Plural, Slot};

/// Return the canonical form of `node`.
pub fn canonicalize(node: &MarkupNode) -> MarkupNode {
    match node {
        MarkupNode::Text(_) | MarkupNode::VariableSlot(_) => node.clone(),
        MarkupNode::Element { tag, children } => MarkupNode::Element {
            tag: tag.clone(),
            children: canonicalize_children(children),
        },
        MarkupNode::Fragment(children) => MarkupNode::Fragment(canonicalize_children(children)),
        MarkupNode::Branch(branch) => {
            let options: IndexMap<String, MarkupNode> = branch
                .options
                .iter()
                .map(|(name, option)| (name.clone(), canonicalize(option)))
                .collect();
            let default_content = branch
                .default_content
                .as_deref()
                .map(|d| Box::new(canonicalize(d)));

            if let Some(slot) = collapsible_slot(&options, default_content.as_deref()) {
                return MarkupNode::VariableSlot(slot.clone());
            }

            MarkupNode::Branch(Branch {
                discriminant: branch.discriminant.clone(),
                options,
                default_content,
            })
        }
        MarkupNode::Plural(plural) => MarkupNode::Plural(Plural {
            count: plural.count.clone(),
            forms: plural
                .forms
                .iter()
                .map(|(category, form)| (*category, canonicalize(form)))
                .collect(),
            default_content: plural
                .default_content
                .as_deref()
                .map(|d| Box::new(canonicalize(d))),
        }),
    }
}

fn canonicalize_children(children: &[MarkupNode]) -> Vec<MarkupNode> {
    let mut out: Vec<MarkupNode> = Vec::with_capacity(children.len());
    for child in children {
        match canonicalize(child) {
            MarkupNode::Text(text) if text.is_empty() => {}
            MarkupNode::Text(text) => {
                if let Some(MarkupNode::Text(prev)) = out.last_mut() {
                    prev.push_str(&text);
                } else {
                    out.push(MarkupNode::Text(text));
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// The slot every alternative reduces to, if there is exactly one.
fn collapsible_slot<'a>(
    options: &'a IndexMap<String, MarkupNode>,
    default_content: Option<&'a MarkupNode>,
) -> Option<&'a Slot> {
    let mut alternatives = options.values().chain(default_content);
    let first = single_slot(alternatives.next()?)?;
    alternatives
        .all(|alt| single_slot(alt) == Some(first))
        .then_some(first)
}

/// A slot, or a fragment/element-free wrapper holding exactly one slot.
fn single_slot(node: &MarkupNode) -> Option<&Slot> {
    match node {
        MarkupNode::VariableSlot(slot) => Some(slot),
        MarkupNode::Fragment(children) if children.len() == 1 => single_slot(&children[0]),
        _ => None,
    }
}
