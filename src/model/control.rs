//! Security control implementation entities

use serde::{Deserialize, Serialize};

use super::{
    attr_or_empty, child_in, child_text_in, children_in, expect_element, in_namespace,
};
use crate::compliance::vocabulary::{
    ControlOrigination, ImplementationStatus, CONTROL_ORIGINATION_PROP,
    IMPLEMENTATION_STATUS_PROP,
};
use crate::error::Result;
use crate::tree::{NodeId, TreeNavigator};

/// Element an implemented control is read from
pub const IMPLEMENTED_REQUIREMENT: &str = "implemented-requirement";

/// A `prop` name/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Build from a `prop` element
    pub fn from_node<D: TreeNavigator + ?Sized>(doc: &D, node: NodeId) -> Result<Self> {
        expect_element(doc, node, "prop")?;
        Ok(Self {
            name: attr_or_empty(doc, node, "name"),
            value: attr_or_empty(doc, node, "value"),
        })
    }
}

/// Narrative for one part of a control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub statement_id: String,

    /// All text under `description`, markup dropped, ends trimmed
    pub value: String,
}

impl Statement {
    /// Build from a `statement` element
    pub fn from_node<D: TreeNavigator + ?Sized>(
        doc: &D,
        node: NodeId,
        namespace: Option<&str>,
    ) -> Result<Self> {
        expect_element(doc, node, "statement")?;
        let value = child_in(doc, node, "description", namespace)
            .map(|description| doc.descendant_text(description).trim().to_string())
            .unwrap_or_default();
        Ok(Self {
            statement_id: attr_or_empty(doc, node, "statement-id"),
            value,
        })
    }
}

/// An organization-defined parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub param_id: String,
    pub value: String,
}

impl Parameter {
    /// Build from a `set-parameter` element
    pub fn from_node<D: TreeNavigator + ?Sized>(
        doc: &D,
        node: NodeId,
        namespace: Option<&str>,
    ) -> Result<Self> {
        expect_element(doc, node, "set-parameter")?;
        Ok(Self {
            param_id: attr_or_empty(doc, node, "param-id"),
            value: child_text_in(doc, node, "value", namespace),
        })
    }
}

/// A role accountable for the control and the parties filling it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsibleRole {
    /// The `role-id` attribute
    pub name: String,

    /// `party-uuid` children in document order; empty for unassigned roles
    pub party_uuids: Vec<String>,
}

impl ResponsibleRole {
    /// Build from a `responsible-role` element
    pub fn from_node<D: TreeNavigator + ?Sized>(
        doc: &D,
        node: NodeId,
        namespace: Option<&str>,
    ) -> Result<Self> {
        expect_element(doc, node, "responsible-role")?;
        let party_uuids = children_in(doc, node, "party-uuid", namespace)
            .into_iter()
            .map(|party| doc.descendant_text(party).trim().to_string())
            .collect();
        Ok(Self {
            name: attr_or_empty(doc, node, "role-id"),
            party_uuids,
        })
    }
}

/// One `implemented-requirement`
///
/// Every list keeps source document order, and duplicates are kept as they
/// appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityControl {
    /// The `control-id` attribute, verbatim
    pub control_id: String,
    pub uuid: Option<String>,

    /// Zero-based position among sibling requirements at extraction time
    pub ordinal_index: usize,

    pub properties: Vec<Property>,
    pub statements: Vec<Statement>,
    pub parameters: Vec<Parameter>,
    pub responsible_roles: Vec<ResponsibleRole>,
}

impl SecurityControl {
    /// Build from an `implemented-requirement` element
    ///
    /// Returns `Ok(None)` when the element has no `control-id`; such a node
    /// does not qualify as a control. Only children in `namespace` (or in no
    /// namespace) are recognized.
    pub fn from_node<D: TreeNavigator + ?Sized>(
        doc: &D,
        node: NodeId,
        ordinal_index: usize,
        namespace: Option<&str>,
    ) -> Result<Option<Self>> {
        expect_element(doc, node, IMPLEMENTED_REQUIREMENT)?;

        let Some(control_id) = doc.attribute(node, "control-id") else {
            return Ok(None);
        };

        let mut control = Self {
            control_id: control_id.to_string(),
            uuid: doc.attribute(node, "uuid").map(str::to_string),
            ordinal_index,
            properties: Vec::new(),
            statements: Vec::new(),
            parameters: Vec::new(),
            responsible_roles: Vec::new(),
        };

        for child in doc.element_children(node) {
            if !in_namespace(doc, child, namespace) {
                continue;
            }
            match doc.local_name(child) {
                Some("prop") => control.properties.push(Property::from_node(doc, child)?),
                Some("statement") => control
                    .statements
                    .push(Statement::from_node(doc, child, namespace)?),
                Some("set-parameter") => control
                    .parameters
                    .push(Parameter::from_node(doc, child, namespace)?),
                Some("responsible-role") => control
                    .responsible_roles
                    .push(ResponsibleRole::from_node(doc, child, namespace)?),
                _ => {}
            }
        }

        Ok(Some(control))
    }

    /// More than one responsible role is declared
    pub fn has_multiple_responsible_roles(&self) -> bool {
        self.responsible_roles.len() > 1
    }

    /// Value of the first property named `name`
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Every property named `name`, in document order
    pub fn properties_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Property> + 'a {
        self.properties.iter().filter(move |p| p.name == name)
    }

    /// First `implementation-status` property, if it is in the vocabulary
    pub fn implementation_status(&self) -> Option<ImplementationStatus> {
        self.property(IMPLEMENTATION_STATUS_PROP)
            .and_then(ImplementationStatus::parse)
    }

    /// Every recognized `control-origination` value, in document order
    pub fn control_originations(&self) -> Vec<ControlOrigination> {
        self.properties_named(CONTROL_ORIGINATION_PROP)
            .filter_map(|p| ControlOrigination::parse(&p.value))
            .collect()
    }

    /// Statement by `statement-id`
    pub fn statement(&self, statement_id: &str) -> Option<&Statement> {
        self.statements.iter().find(|s| s.statement_id == statement_id)
    }

    /// Parameter value by `param-id`
    pub fn parameter(&self, param_id: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.param_id == param_id)
            .map(|p| p.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SspError;
    use crate::tree::XmlTree;
    use crate::OSCAL_NAMESPACE;
    use pretty_assertions::assert_eq;

    fn control(xml: &str) -> Option<SecurityControl> {
        let tree = XmlTree::parse(xml).unwrap();
        let root = tree.root_element().unwrap();
        SecurityControl::from_node(&tree, root, 0, tree.namespace_uri(root)).unwrap()
    }

    #[test]
    fn test_minimal_control() {
        let ctl = control(
            r#"<implemented-requirement control-id="ac-1" uuid="test"><prop name="implementation-status" value="implemented"/></implemented-requirement>"#,
        )
        .unwrap();
        assert_eq!(ctl.control_id, "ac-1");
        assert_eq!(ctl.uuid.as_deref(), Some("test"));
        assert_eq!(ctl.properties, vec![Property::new("implementation-status", "implemented")]);
        assert_eq!(ctl.implementation_status(), Some(ImplementationStatus::Implemented));
    }

    #[test]
    fn test_property_order_preserved() {
        let ctl = control(
            r#"<implemented-requirement control-id="ac-2">
  <prop name="implementation-status" value="planned"/>
  <prop name="control-origination" value="shared"/>
  <prop name="control-origination" value="inherited"/>
</implemented-requirement>"#,
        )
        .unwrap();
        assert_eq!(ctl.properties[0].name, "implementation-status");
        assert_eq!(ctl.properties[1].name, "control-origination");
        assert_eq!(ctl.properties.len(), 3);
        assert_eq!(
            ctl.control_originations(),
            vec![ControlOrigination::Shared, ControlOrigination::Inherited]
        );
    }

    #[test]
    fn test_missing_control_id_does_not_qualify() {
        assert!(control(r#"<implemented-requirement uuid="x"><prop name="a" value="b"/></implemented-requirement>"#).is_none());
    }

    #[test]
    fn test_control_id_not_normalized() {
        let ctl = control(r#"<implemented-requirement control-id=" AC-2(1) "/>"#).unwrap();
        assert_eq!(ctl.control_id, " AC-2(1) ");
        assert!(ctl.uuid.is_none());
    }

    #[test]
    fn test_responsible_roles() {
        let one = control(
            r#"<implemented-requirement control-id="ac-1"><responsible-role role-id="admin"><party-uuid>p1</party-uuid><party-uuid>p2</party-uuid></responsible-role></implemented-requirement>"#,
        )
        .unwrap();
        assert!(!one.has_multiple_responsible_roles());
        assert_eq!(one.responsible_roles[0].name, "admin");
        assert_eq!(one.responsible_roles[0].party_uuids, vec!["p1", "p2"]);

        let two = control(
            r#"<implemented-requirement control-id="ac-1"><responsible-role role-id="admin"/><responsible-role role-id="isso"/></implemented-requirement>"#,
        )
        .unwrap();
        assert!(two.has_multiple_responsible_roles());
        assert!(two.responsible_roles[1].party_uuids.is_empty());
    }

    #[test]
    fn test_statement_text_strips_markup() {
        let ctl = control(
            r#"<implemented-requirement control-id="ac-1">
  <statement statement-id="ac-1_smt.a" uuid="s1">
    <description><p>Test statement content.</p></description>
  </statement>
</implemented-requirement>"#,
        )
        .unwrap();
        let smt = ctl.statement("ac-1_smt.a").unwrap();
        assert!(smt.value.contains("Test statement content"));
        assert!(!smt.value.contains("<p>"));
        assert_eq!(smt.value, "Test statement content.");
    }

    #[test]
    fn test_statement_multiple_paragraphs() {
        let ctl = control(
            r#"<implemented-requirement control-id="ac-1"><statement statement-id="s"><description><p>First <b>bold</b> line.</p><p>Second.</p></description></statement></implemented-requirement>"#,
        )
        .unwrap();
        assert_eq!(ctl.statements[0].value, "First bold line.Second.");
    }

    #[test]
    fn test_statement_without_description() {
        let ctl = control(r#"<implemented-requirement control-id="ac-1"><statement statement-id="s"/></implemented-requirement>"#).unwrap();
        assert_eq!(ctl.statements[0].value, "");
    }

    #[test]
    fn test_parameters() {
        let ctl = control(
            r#"<implemented-requirement control-id="ac-1">
  <set-parameter param-id="ac-1_prm_1"><value> all personnel </value></set-parameter>
  <set-parameter param-id="ac-1_prm_2"/>
</implemented-requirement>"#,
        )
        .unwrap();
        assert_eq!(ctl.parameter("ac-1_prm_1"), Some("all personnel"));
        assert_eq!(ctl.parameter("ac-1_prm_2"), Some(""));
        assert!(ctl.parameter("missing").is_none());
    }

    #[test]
    fn test_unrecognized_children_skipped() {
        let ctl = control(
            r#"<implemented-requirement control-id="ac-1"><remarks><prop name="nested" value="x"/></remarks><link href="x"/><prop name="a" value="b"/></implemented-requirement>"#,
        )
        .unwrap();
        assert_eq!(ctl.properties, vec![Property::new("a", "b")]);
        assert!(ctl.statements.is_empty());
        assert!(ctl.parameters.is_empty());
        assert!(ctl.responsible_roles.is_empty());
    }

    #[test]
    fn test_foreign_namespace_children_skipped() {
        let xml = format!(
            r#"<implemented-requirement xmlns="{}" xmlns:x="urn:ext" control-id="ac-1"><x:prop name="ext" value="1"/><prop name="own" value="2"/></implemented-requirement>"#,
            OSCAL_NAMESPACE
        );
        let ctl = control(&xml).unwrap();
        assert_eq!(ctl.properties, vec![Property::new("own", "2")]);
    }

    #[test]
    fn test_foreign_namespace_decoys_in_nested_children() {
        let xml = format!(
            r#"<implemented-requirement xmlns="{}" xmlns:x="urn:ext" control-id="ac-1">
  <statement statement-id="s1">
    <x:description><p>foreign</p></x:description>
    <description><p>real</p></description>
  </statement>
  <set-parameter param-id="p1"><x:value>foreign</x:value><value>real</value></set-parameter>
  <responsible-role role-id="admin"><x:party-uuid>foreign</x:party-uuid><party-uuid>real</party-uuid></responsible-role>
</implemented-requirement>"#,
            OSCAL_NAMESPACE
        );
        let ctl = control(&xml).unwrap();
        assert_eq!(ctl.statement("s1").unwrap().value, "real");
        assert_eq!(ctl.parameter("p1"), Some("real"));
        assert_eq!(ctl.responsible_roles[0].party_uuids, vec!["real"]);
    }

    #[test]
    fn test_ordinal_is_caller_supplied() {
        let tree = XmlTree::parse(r#"<implemented-requirement control-id="ac-1"/>"#).unwrap();
        let root = tree.root_element().unwrap();
        let ctl = SecurityControl::from_node(&tree, root, 7, None).unwrap().unwrap();
        assert_eq!(ctl.ordinal_index, 7);
    }

    #[test]
    fn test_wrong_node_category() {
        let tree = XmlTree::parse("<statement>text</statement>").unwrap();
        let root = tree.root_element().unwrap();
        assert!(matches!(
            SecurityControl::from_node(&tree, root, 0, None),
            Err(SspError::UnexpectedElement { .. })
        ));
        let text = tree.children(root)[0];
        assert!(matches!(
            SecurityControl::from_node(&tree, text, 0, None),
            Err(SspError::NotAnElement { .. })
        ));
    }
}
