//! Tree Navigator
//!
//! Read-only access to a namespace-aware, ordered XML tree.
//!
//! # Overview
//!
//! Everything above this module (fingerprints, extractors, the validator and
//! the classifier) talks to the document through the [`TreeNavigator`] trait
//! rather than a concrete DOM. [`XmlTree`] is the arena-backed implementation
//! produced by the parser, and it can also be assembled by hand for fixtures.
//!
//! Absence is never an error at this layer: a missing attribute or child
//! comes back as `None` or an empty list, and callers decide whether that is
//! fatal.
//!
//! # Usage
//!
//! ```ignore
//! use oscal_ssp::tree::{TreeNavigator, XmlTree};
//!
//! let tree = XmlTree::parse(xml)?;
//! let root = tree.root_element().expect("parsed documents have a root");
//! for child in tree.children_named(root, "control-implementation") {
//!     println!("{:?}", tree.attribute(child, "uuid"));
//! }
//! ```

mod document;
mod parse;
mod text;

pub use document::{Attribute, XmlNode, XmlTree};
pub use text::remove_tag;

use serde::{Deserialize, Serialize};

/// Index of a node inside an [`XmlTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The document node; always the first slot of the arena
    pub const DOCUMENT: NodeId = NodeId(0);

    /// Raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural category of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Document,
    Element,
    Text,
    CData,
    Comment,
    ProcessingInstruction,
}

impl NodeKind {
    /// Text-bearing nodes contribute to an element's string value
    pub fn is_text(self) -> bool {
        matches!(self, Self::Text | Self::CData)
    }
}

/// Minimal read-only view over an ordered XML tree
///
/// Implementors supply the primitive accessors; the provided methods build
/// the filtered views the rest of the crate relies on. An id that does not
/// belong to the tree behaves like a node with no name, attributes, or
/// children.
pub trait TreeNavigator {
    /// The document node (parent of the root element)
    fn document(&self) -> NodeId;

    /// Structural category of a node
    fn kind(&self, id: NodeId) -> Option<NodeKind>;

    /// Namespace-stripped element name
    fn local_name(&self, id: NodeId) -> Option<&str>;

    /// Namespace prefix as written in the source, if any
    fn prefix(&self, id: NodeId) -> Option<&str>;

    /// Resolved namespace URI of an element
    fn namespace_uri(&self, id: NodeId) -> Option<&str>;

    /// Attribute value by (qualified) name
    fn attribute(&self, id: NodeId, name: &str) -> Option<&str>;

    /// All attributes in source order
    fn attributes(&self, id: NodeId) -> Vec<(&str, &str)>;

    /// Ordered child list
    fn children(&self, id: NodeId) -> &[NodeId];

    /// Parent node, `None` for the document node
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Own text of a text, CDATA, comment, or processing-instruction node
    fn text(&self, id: NodeId) -> Option<&str>;

    // === Provided navigation ===

    /// Whether the node is an element
    fn is_element(&self, id: NodeId) -> bool {
        self.kind(id) == Some(NodeKind::Element)
    }

    /// Whether the node is the document's root element
    fn is_root(&self, id: NodeId) -> bool {
        self.is_element(id) && self.parent(id) == Some(self.document())
    }

    /// The single top-level element
    fn root_element(&self) -> Option<NodeId> {
        let document = self.document();
        self.children(document)
            .iter()
            .copied()
            .find(|&child| self.is_element(child))
    }

    /// Element children in document order, skipping text and comments
    fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.is_element(child))
            .collect()
    }

    /// Element children whose local name matches `name`
    fn children_named(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.is_element(child) && self.local_name(child) == Some(name))
            .collect()
    }

    /// First element child whose local name matches `name`
    fn first_child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.is_element(child) && self.local_name(child) == Some(name))
    }

    /// All descendants of `id` in document order, excluding `id` itself
    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// First descendant element with the given local name, in document order
    fn first_descendant_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(id)
            .into_iter()
            .find(|&node| self.is_element(node) && self.local_name(node) == Some(name))
    }

    /// Concatenation of every descendant text and CDATA node
    ///
    /// Markup is dropped but the text it encloses is kept. For a text node
    /// this is the node's own text.
    fn descendant_text(&self, id: NodeId) -> String {
        match self.kind(id) {
            Some(kind) if kind.is_text() => self.text(id).unwrap_or_default().to_string(),
            Some(NodeKind::Element) | Some(NodeKind::Document) => {
                let mut out = String::new();
                for node in self.descendants(id) {
                    if self.kind(node).is_some_and(NodeKind::is_text) {
                        out.push_str(self.text(node).unwrap_or_default());
                    }
                }
                out
            }
            _ => String::new(),
        }
    }

    /// Trimmed text content of the first child with the given local name
    fn child_text(&self, id: NodeId, name: &str) -> Option<String> {
        self.first_child_named(id, name)
            .map(|child| self.descendant_text(child).trim().to_string())
    }
}
