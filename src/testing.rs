//! Test fixtures
//!
//! [`SspFixture`] assembles OSCAL SSP documents for tests without hand-writing
//! XML in every case.
//!
//! # Usage
//!
//! ```ignore
//! use oscal_ssp::testing::SspFixture;
//!
//! let xml = SspFixture::new()
//!     .sensitivity("high")
//!     .control("ac-1", &[("implementation-status", "implemented")])
//!     .control_with_roles("ac-2", &["admin", "customer"])
//!     .build();
//! ```

use quick_xml::escape::escape;

use crate::OSCAL_NAMESPACE;

/// Builder for SSP XML documents
#[derive(Debug, Clone)]
pub struct SspFixture {
    namespace: Option<String>,
    title: String,
    last_modified: Option<String>,
    system_name: String,
    sensitivity: Option<String>,
    metadata: bool,
    system_characteristics: bool,
    control_implementation: bool,
    requirements: Vec<String>,
}

impl Default for SspFixture {
    fn default() -> Self {
        Self {
            namespace: Some(OSCAL_NAMESPACE.to_string()),
            title: "Test SSP".to_string(),
            last_modified: Some("2024-01-15T10:00:00Z".to_string()),
            system_name: "Test System".to_string(),
            sensitivity: Some("moderate".to_string()),
            metadata: true,
            system_characteristics: true,
            control_implementation: true,
            requirements: Vec::new(),
        }
    }
}

impl SspFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root default namespace; `None` leaves the root unqualified
    pub fn namespace(mut self, namespace: Option<&str>) -> Self {
        self.namespace = namespace.map(str::to_string);
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn last_modified(mut self, value: Option<&str>) -> Self {
        self.last_modified = value.map(str::to_string);
        self
    }

    pub fn system_name(mut self, name: &str) -> Self {
        self.system_name = name.to_string();
        self
    }

    pub fn sensitivity(mut self, level: &str) -> Self {
        self.sensitivity = Some(level.to_string());
        self
    }

    pub fn without_sensitivity(mut self) -> Self {
        self.sensitivity = None;
        self
    }

    pub fn without_metadata(mut self) -> Self {
        self.metadata = false;
        self
    }

    pub fn without_system_characteristics(mut self) -> Self {
        self.system_characteristics = false;
        self
    }

    pub fn without_control_implementation(mut self) -> Self {
        self.control_implementation = false;
        self
    }

    /// Requirement with the given `prop` name/value pairs
    pub fn control(mut self, control_id: &str, props: &[(&str, &str)]) -> Self {
        let body: String = props.iter().map(|(name, value)| prop(name, value)).collect();
        self.requirements.push(requirement(control_id, &body));
        self
    }

    /// Requirement with one `responsible-role` per role id
    pub fn control_with_roles(mut self, control_id: &str, roles: &[&str]) -> Self {
        let body: String = roles
            .iter()
            .map(|role| format!(r#"<responsible-role role-id="{}"/>"#, escape(*role)))
            .collect();
        self.requirements.push(requirement(control_id, &body));
        self
    }

    /// Requirement with one statement whose description is `description_xml`
    pub fn control_with_statement(mut self, control_id: &str, statement_id: &str, description_xml: &str) -> Self {
        let body = format!(
            r#"<statement statement-id="{}"><description>{}</description></statement>"#,
            escape(statement_id),
            description_xml
        );
        self.requirements.push(requirement(control_id, &body));
        self
    }

    /// Requirement with one `set-parameter`
    pub fn control_with_parameter(mut self, control_id: &str, param_id: &str, value: &str) -> Self {
        let body = format!(
            r#"<set-parameter param-id="{}"><value>{}</value></set-parameter>"#,
            escape(param_id),
            escape(value)
        );
        self.requirements.push(requirement(control_id, &body));
        self
    }

    /// Append a raw child of `control-implementation` verbatim
    pub fn raw_requirement(mut self, xml: &str) -> Self {
        self.requirements.push(xml.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        match &self.namespace {
            Some(ns) => xml.push_str(&format!(
                "<system-security-plan xmlns=\"{}\" uuid=\"ssp-1\">\n",
                escape(ns.as_str())
            )),
            None => xml.push_str("<system-security-plan uuid=\"ssp-1\">\n"),
        }

        if self.metadata {
            xml.push_str("  <metadata>\n");
            xml.push_str(&format!("    <title>{}</title>\n", escape(self.title.as_str())));
            if let Some(ts) = &self.last_modified {
                xml.push_str(&format!("    <last-modified>{}</last-modified>\n", escape(ts.as_str())));
            }
            xml.push_str("    <version>1.0</version>\n");
            xml.push_str("    <oscal-version>1.0.4</oscal-version>\n");
            xml.push_str("  </metadata>\n");
        }

        if self.system_characteristics {
            xml.push_str("  <system-characteristics>\n");
            xml.push_str("    <system-id identifier-type=\"https://fedramp.gov\">F00000001</system-id>\n");
            xml.push_str(&format!(
                "    <system-name>{}</system-name>\n",
                escape(self.system_name.as_str())
            ));
            if let Some(level) = &self.sensitivity {
                xml.push_str(&format!(
                    "    <security-sensitivity-level>{}</security-sensitivity-level>\n",
                    escape(level.as_str())
                ));
            }
            xml.push_str("  </system-characteristics>\n");
        }

        if self.control_implementation {
            xml.push_str("  <control-implementation>\n");
            xml.push_str("    <description><p>Controls</p></description>\n");
            for req in &self.requirements {
                xml.push_str("    ");
                xml.push_str(req);
                xml.push('\n');
            }
            xml.push_str("  </control-implementation>\n");
        }

        xml.push_str("</system-security-plan>\n");
        xml
    }
}

fn prop(name: &str, value: &str) -> String {
    format!(r#"<prop name="{}" value="{}"/>"#, escape(name), escape(value))
}

fn requirement(control_id: &str, body: &str) -> String {
    format!(
        r#"<implemented-requirement control-id="{}" uuid="req-{}">{}</implemented-requirement>"#,
        escape(control_id),
        escape(control_id),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{TreeNavigator, XmlTree};

    #[test]
    fn test_default_fixture_parses() {
        let tree = XmlTree::parse(&SspFixture::new().build()).unwrap();
        let root = tree.root_element().unwrap();
        assert_eq!(tree.local_name(root), Some("system-security-plan"));
        assert_eq!(tree.namespace_uri(root), Some(OSCAL_NAMESPACE));
        assert!(tree.first_descendant_named(root, "control-implementation").is_some());
    }

    #[test]
    fn test_values_are_escaped() {
        let xml = SspFixture::new().title("A & B <draft>").build();
        let tree = XmlTree::parse(&xml).unwrap();
        let root = tree.root_element().unwrap();
        let metadata = tree.first_descendant_named(root, "metadata").unwrap();
        assert_eq!(tree.child_text(metadata, "title").as_deref(), Some("A & B <draft>"));
    }

    #[test]
    fn test_unqualified_root() {
        let xml = SspFixture::new().namespace(None).build();
        let tree = XmlTree::parse(&xml).unwrap();
        assert_eq!(tree.namespace_uri(tree.root_element().unwrap()), None);
    }
}
