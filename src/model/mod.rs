//! Entity Extractors
//!
//! Strongly-typed SSP entities, each built once from a single source node and
//! never mutated afterwards.
//!
//! | Entity | Source element |
//! |--------|----------------|
//! | [`Metadata`] | `metadata` |
//! | [`SystemCharacteristics`] | `system-characteristics` |
//! | [`SecurityControl`] | `implemented-requirement` |
//! | [`Property`] | `prop` |
//! | [`Statement`] | `statement` |
//! | [`Parameter`] | `set-parameter` |
//! | [`ResponsibleRole`] | `responsible-role` |
//!
//! Extractors scan children once in document order and skip anything they do
//! not recognize. Missing optional children never fail extraction; the only
//! errors are being handed a non-element node or an element with the wrong
//! name.

mod control;
mod metadata;
mod system;

pub use control::{
    Parameter, Property, ResponsibleRole, SecurityControl, Statement, IMPLEMENTED_REQUIREMENT,
};
pub use metadata::Metadata;
pub use system::SystemCharacteristics;

use crate::error::{Result, SspError};
use crate::tree::{NodeId, TreeNavigator};

/// Fail unless `node` is an element named `expected`
pub(crate) fn expect_element<D: TreeNavigator + ?Sized>(
    doc: &D,
    node: NodeId,
    expected: &str,
) -> Result<()> {
    if !doc.is_element(node) {
        return Err(SspError::NotAnElement { node: node.index() });
    }
    match doc.local_name(node) {
        Some(name) if name == expected => Ok(()),
        other => Err(SspError::UnexpectedElement {
            expected: expected.to_string(),
            found: other.unwrap_or_default().to_string(),
        }),
    }
}

/// A child belongs to the document vocabulary when it is in the document
/// namespace or in no namespace at all
pub(crate) fn in_namespace<D: TreeNavigator + ?Sized>(
    doc: &D,
    node: NodeId,
    namespace: Option<&str>,
) -> bool {
    match (doc.namespace_uri(node), namespace) {
        (Some(found), Some(expected)) => found == expected,
        _ => true,
    }
}

/// Element children named `name` that belong to the document vocabulary
pub(crate) fn children_in<D: TreeNavigator + ?Sized>(
    doc: &D,
    node: NodeId,
    name: &str,
    namespace: Option<&str>,
) -> Vec<NodeId> {
    doc.children_named(node, name)
        .into_iter()
        .filter(|&child| in_namespace(doc, child, namespace))
        .collect()
}

/// First element child named `name` in the document vocabulary
pub(crate) fn child_in<D: TreeNavigator + ?Sized>(
    doc: &D,
    node: NodeId,
    name: &str,
    namespace: Option<&str>,
) -> Option<NodeId> {
    doc.children_named(node, name)
        .into_iter()
        .find(|&child| in_namespace(doc, child, namespace))
}

/// Trimmed text of [`child_in`], or empty when there is no such child
pub(crate) fn child_text_in<D: TreeNavigator + ?Sized>(
    doc: &D,
    node: NodeId,
    name: &str,
    namespace: Option<&str>,
) -> String {
    child_in(doc, node, name, namespace)
        .map(|child| doc.descendant_text(child).trim().to_string())
        .unwrap_or_default()
}

/// Attribute value, or empty when absent
pub(crate) fn attr_or_empty<D: TreeNavigator + ?Sized>(doc: &D, node: NodeId, name: &str) -> String {
    doc.attribute(node, name).unwrap_or_default().to_string()
}
