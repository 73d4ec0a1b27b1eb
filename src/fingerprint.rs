//! Fingerprint Engine
//!
//! Computes document-order locators for any node in a tree.
//!
//! A fingerprint is a `/`-separated path from the root element down to the
//! node, where each step is the local name plus a 1-based index among
//! siblings that share that name:
//!
//! ```text
//! /system-security-plan[1]/control-implementation[1]/implemented-requirement[3]
//! ```
//!
//! Indices are relative to same-name siblings, not absolute child positions,
//! so inserting an unrelated element elsewhere under the same parent does not
//! move the locator. Re-parsing an unmodified document yields identical
//! fingerprints.
//!
//! Text, comment, and processing-instruction nodes are locatable too; they
//! appear as `text()[n]`, `comment()[n]` and `processing-instruction()[n]`,
//! counted among siblings of the same kind.

use serde::{Deserialize, Serialize};

use crate::tree::{NodeId, NodeKind, TreeNavigator};

/// Both locators for one node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Indexed path, unique within the document
    pub xpath: String,
    /// Path with indices omitted; shared by every node of the same shape
    pub shape: String,
}

impl Fingerprint {
    /// Compute both locators for `node`
    pub fn of<D: TreeNavigator + ?Sized>(doc: &D, node: NodeId) -> Self {
        Self {
            xpath: find_xpath(doc, node),
            shape: find_xpath_without_index(doc, node),
        }
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.xpath)
    }
}

/// The name a node is counted under among its siblings
fn step_name<D: TreeNavigator + ?Sized>(doc: &D, node: NodeId) -> Option<String> {
    match doc.kind(node)? {
        NodeKind::Element => doc.local_name(node).map(str::to_string),
        NodeKind::Text | NodeKind::CData => Some("text()".to_string()),
        NodeKind::Comment => Some("comment()".to_string()),
        NodeKind::ProcessingInstruction => Some("processing-instruction()".to_string()),
        NodeKind::Document => None,
    }
}

/// 1-based position of `node` among its parent's children with the same name
///
/// Siblings with other names are not counted. A node with no same-name
/// siblings, or with no parent at all, is at position 1.
pub fn find_element_index<D: TreeNavigator + ?Sized>(doc: &D, node: NodeId) -> usize {
    let Some(parent) = doc.parent(node) else {
        return 1;
    };
    let name = step_name(doc, node);

    let mut index = 0;
    for &sibling in doc.children(parent) {
        if step_name(doc, sibling) == name {
            index += 1;
        }
        if sibling == node {
            return index;
        }
    }
    1
}

/// Root-first list of (name, index) steps ending at `node`
fn steps<D: TreeNavigator + ?Sized>(doc: &D, node: NodeId) -> Vec<(String, usize)> {
    let mut steps = Vec::new();
    let mut cursor = Some(node);
    while let Some(current) = cursor {
        if let Some(name) = step_name(doc, current) {
            steps.push((name, find_element_index(doc, current)));
        }
        cursor = doc.parent(current);
    }
    steps.reverse();
    steps
}

/// Indexed locator from the root element down to `node` inclusive
///
/// The document node itself has the empty path.
pub fn find_xpath<D: TreeNavigator + ?Sized>(doc: &D, node: NodeId) -> String {
    steps(doc, node)
        .into_iter()
        .map(|(name, index)| format!("/{}[{}]", name, index))
        .collect()
}

/// Same traversal as [`find_xpath`] with every `[n]` annotation dropped
pub fn find_xpath_without_index<D: TreeNavigator + ?Sized>(doc: &D, node: NodeId) -> String {
    steps(doc, node)
        .into_iter()
        .map(|(name, _)| format!("/{}", name))
        .collect()
}

/// Split a path into its non-empty `/`-delimited segments, left to right
///
/// An empty string yields no segments.
pub fn components(xpath: &str) -> Vec<&str> {
    xpath.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Split a segment like `statement[2]` into `("statement", 2)`
///
/// A bare name is index 1. Returns `None` for a malformed or zero index.
fn parse_segment(segment: &str) -> Option<(&str, usize)> {
    match segment.strip_suffix(']').and_then(|s| s.rsplit_once('[')) {
        Some((name, index)) => {
            let index: usize = index.parse().ok()?;
            (index > 0 && !name.is_empty()).then_some((name, index))
        }
        None => Some((segment, 1)),
    }
}

/// Re-find the node a fingerprint points at
///
/// Accepts the output of [`find_xpath`] (and bare-name segments, which mean
/// index 1). Returns `None` when any step does not exist in `doc`.
pub fn resolve_xpath<D: TreeNavigator + ?Sized>(doc: &D, xpath: &str) -> Option<NodeId> {
    let segments = components(xpath);
    if segments.is_empty() {
        return None;
    }

    let mut current = doc.document();
    for segment in segments {
        let (name, index) = parse_segment(segment)?;
        current = doc
            .children(current)
            .iter()
            .copied()
            .filter(|&child| step_name(doc, child).as_deref() == Some(name))
            .nth(index - 1)?;
    }
    Some(current)
}
