//! System characteristics

use serde::{Deserialize, Serialize};

use super::{child_text_in, expect_element};
use crate::compliance::{BaselineLevel, SENSITIVITY_LEVEL_ELEMENT};
use crate::error::Result;
use crate::tree::{NodeId, TreeNavigator};

/// Identity and sensitivity of the system, from `system-characteristics`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemCharacteristics {
    pub system_name: String,
    pub system_id: String,

    /// Raw sensitivity level text; empty when not declared
    pub security_sensitivity_level: String,
}

impl SystemCharacteristics {
    /// Build from a `system-characteristics` element
    pub fn from_node<D: TreeNavigator + ?Sized>(
        doc: &D,
        node: NodeId,
        namespace: Option<&str>,
    ) -> Result<Self> {
        expect_element(doc, node, "system-characteristics")?;

        let text = |name: &str| child_text_in(doc, node, name, namespace);
        Ok(Self {
            system_name: text("system-name"),
            system_id: text("system-id"),
            security_sensitivity_level: text(SENSITIVITY_LEVEL_ELEMENT),
        })
    }

    /// Declared sensitivity level as a baseline, if it is one of the known tiers
    pub fn declared_baseline(&self) -> Option<BaselineLevel> {
        BaselineLevel::from_sensitivity(&self.security_sensitivity_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::XmlTree;

    fn system(xml: &str) -> SystemCharacteristics {
        let tree = XmlTree::parse(xml).unwrap();
        let root = tree.root_element().unwrap();
        SystemCharacteristics::from_node(&tree, root, tree.namespace_uri(root)).unwrap()
    }

    #[test]
    fn test_full_characteristics() {
        let sys = system(
            r#"<system-characteristics>
  <system-id identifier-type="https://fedramp.gov">F00000000</system-id>
  <system-name>Acme Cloud</system-name>
  <security-sensitivity-level>moderate</security-sensitivity-level>
</system-characteristics>"#,
        );
        assert_eq!(sys.system_name, "Acme Cloud");
        assert_eq!(sys.system_id, "F00000000");
        assert_eq!(sys.security_sensitivity_level, "moderate");
        assert_eq!(sys.declared_baseline(), Some(BaselineLevel::Moderate));
    }

    #[test]
    fn test_foreign_namespace_children_ignored() {
        let sys = system(
            r#"<system-characteristics xmlns="http://csrc.nist.gov/ns/oscal/1.0" xmlns:x="urn:ext">
  <x:system-name>ForeignSys</x:system-name>
  <system-name>Acme Cloud</system-name>
  <x:security-sensitivity-level>high</x:security-sensitivity-level>
</system-characteristics>"#,
        );
        assert_eq!(sys.system_name, "Acme Cloud");
        assert_eq!(sys.security_sensitivity_level, "");
    }

    #[test]
    fn test_sensitivity_may_be_empty() {
        let sys = system("<system-characteristics><system-name>X</system-name></system-characteristics>");
        assert_eq!(sys.security_sensitivity_level, "");
        assert!(sys.declared_baseline().is_none());
    }
}
