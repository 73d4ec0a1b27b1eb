//! Arena-backed XML tree

use std::path::Path;

use super::{NodeId, NodeKind, TreeNavigator};
use crate::error::{Result, SspError};

/// An attribute as written on the element, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified name (e.g. `control-id`, `xml:lang`)
    pub name: String,
    pub value: String,
}

/// A single node in the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    pub kind: NodeKind,
    pub prefix: Option<String>,
    pub local_name: Option<String>,
    pub namespace: Option<String>,
    pub attributes: Vec<Attribute>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub text: Option<String>,
}

impl XmlNode {
    fn bare(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            prefix: None,
            local_name: None,
            namespace: None,
            attributes: Vec::new(),
            children: Vec::new(),
            parent,
            text: None,
        }
    }
}

/// Ordered, parent-linked XML tree stored in a flat arena
///
/// Nodes are never removed, so a [`NodeId`] stays valid for the lifetime of
/// the tree. The tree is built once (by the parser or by hand) and is only
/// read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlTree {
    nodes: Vec<XmlNode>,
}

impl Default for XmlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlTree {
    /// Create an empty tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![XmlNode::bare(NodeKind::Document, None)],
        }
    }

    /// Parse a document from a string
    pub fn parse(xml: &str) -> Result<Self> {
        super::parse::parse_document(xml)
    }

    /// Read and parse a document from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SspError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Number of nodes, including the document node
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its document node, so it is empty when that is all
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Borrow a node by id
    pub fn node(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(id.0)
    }

    /// Append an element under `parent`
    ///
    /// `name` may carry a prefix (`o:metadata`); the local part is what
    /// navigation and fingerprints match on.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: &str,
        namespace: Option<&str>,
        attributes: &[(&str, &str)],
    ) -> NodeId {
        let (prefix, local) = match name.split_once(':') {
            Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
            None => (None, name.to_string()),
        };
        let mut node = XmlNode::bare(NodeKind::Element, Some(parent));
        node.prefix = prefix;
        node.local_name = Some(local);
        node.namespace = namespace.map(str::to_string);
        node.attributes = attributes
            .iter()
            .map(|(name, value)| Attribute {
                name: (*name).to_string(),
                value: (*value).to_string(),
            })
            .collect();
        self.push(parent, node)
    }

    /// Append a text node under `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append_leaf(parent, NodeKind::Text, text)
    }

    /// Append a CDATA section under `parent`
    pub fn append_cdata(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append_leaf(parent, NodeKind::CData, text)
    }

    /// Append a comment under `parent`
    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append_leaf(parent, NodeKind::Comment, text)
    }

    /// Append a processing instruction under `parent`
    pub fn append_processing_instruction(&mut self, parent: NodeId, content: &str) -> NodeId {
        self.append_leaf(parent, NodeKind::ProcessingInstruction, content)
    }

    fn append_leaf(&mut self, parent: NodeId, kind: NodeKind, text: &str) -> NodeId {
        let mut node = XmlNode::bare(kind, Some(parent));
        node.text = Some(text.to_string());
        self.push(parent, node)
    }

    fn push(&mut self, parent: NodeId, node: XmlNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        if let Some(parent_node) = self.nodes.get_mut(parent.0) {
            parent_node.children.push(id);
        }
        id
    }
}

impl TreeNavigator for XmlTree {
    fn document(&self) -> NodeId {
        NodeId::DOCUMENT
    }

    fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(|n| n.kind)
    }

    fn local_name(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.local_name.as_deref())
    }

    fn prefix(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.prefix.as_deref())
    }

    fn namespace_uri(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.namespace.as_deref())
    }

    fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).and_then(|n| {
            n.attributes
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str())
        })
    }

    fn attributes(&self, id: NodeId) -> Vec<(&str, &str)> {
        self.node(id)
            .map(|n| {
                n.attributes
                    .iter()
                    .map(|a| (a.name.as_str(), a.value.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_document_only() {
        let tree = XmlTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.kind(NodeId::DOCUMENT), Some(NodeKind::Document));
        assert!(tree.root_element().is_none());
    }

    #[test]
    fn test_build_by_hand() {
        let mut tree = XmlTree::new();
        let root = tree.append_element(NodeId::DOCUMENT, "o:ssp", Some("urn:x"), &[]);
        let child = tree.append_element(root, "prop", Some("urn:x"), &[("name", "a"), ("value", "b")]);
        tree.append_text(child, "hello");

        assert_eq!(tree.root_element(), Some(root));
        assert_eq!(tree.prefix(root), Some("o"));
        assert_eq!(tree.local_name(root), Some("ssp"));
        assert_eq!(tree.attributes(child), vec![("name", "a"), ("value", "b")]);
        assert_eq!(tree.descendant_text(root), "hello");
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_attribute_order_preserved() {
        let tree = XmlTree::parse(r#"<r z="1" a="2" m="3"/>"#).unwrap();
        let root = tree.root_element().unwrap();
        let names: Vec<_> = tree.attributes(root).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_from_file_missing() {
        let err = XmlTree::from_file("/nonexistent/ssp.xml").unwrap_err();
        assert!(matches!(err, SspError::Io { .. }));
    }
}
