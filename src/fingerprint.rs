//! Structural fingerprints.
//!
//! A page's fingerprint is the set of hierarchy paths of its interesting
//! nodes: elements whose own text mentions an event detail such as a date,
//! a price or a phone number. Two pages rendered from the same template put
//! those details in the same slots, so their paths largely coincide.

use std::collections::BTreeSet;

use crate::config::Lexicon;
use crate::document::{Document, NodeId, NodeKind};

pub const SEPARATOR: &str = ">";

/// Set of hierarchy paths; ordering carries no meaning.
pub type Fingerprint = BTreeSet<String>;

/// Every element whose lowercased direct text matches the lexicon.
pub fn find_nodes(doc: &Document, lexicon: &Lexicon) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut stack = vec![doc.root()];

    while let Some(id) = stack.pop() {
        let node = doc.node(id);
        stack.extend_from_slice(node.children());

        if node.kind() == NodeKind::Comment {
            continue;
        }
        if lexicon.matches(&node.text().to_lowercase()) {
            found.push(id);
        }
    }
    found
}

/// Path from the root to `id`, e.g. `html>body[1]>div[0]>p[3]`.
pub fn get_hierarchy(doc: &Document, id: NodeId) -> String {
    let mut parts = Vec::new();
    let mut current = Some(id);

    while let Some(id) = current {
        let node = doc.node(id);
        match doc.ordinal(id) {
            Some(ordinal) => parts.push(format!("{}[{}]", node.tag(), ordinal)),
            None => parts.push(node.tag().to_string()),
        }
        current = node.parent();
    }

    parts.reverse();
    parts.join(SEPARATOR)
}

pub fn fingerprint(doc: &Document, lexicon: &Lexicon) -> Fingerprint {
    find_nodes(doc, lexicon)
        .into_iter()
        .map(|id| get_hierarchy(doc, id))
        .collect()
}
