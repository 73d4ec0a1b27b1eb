//! Structural Validation
//!
//! Checks that a document has the shape an SSP needs before extraction.
//!
//! # Checks
//!
//! Each check runs independently and lands in either the error or the
//! warning list:
//!
//! | Check | Severity |
//! |-------|----------|
//! | Root namespace equals the expected OSCAL namespace | error |
//! | A `metadata` element exists | error |
//! | A `system-characteristics` element exists | error |
//! | A `control-implementation` element exists | warning |
//!
//! Input that does not parse at all produces a single error and no further
//! checks.
//!
//! # Usage
//!
//! ```ignore
//! use oscal_ssp::compliance::DocumentValidator;
//!
//! let result = DocumentValidator::default().validate_str(&xml);
//! if !result.is_valid {
//!     for error in &result.errors {
//!         eprintln!("{}", error);
//!     }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tree::{TreeNavigator, XmlTree};
use crate::OSCAL_NAMESPACE;

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ValidationIssue {
    /// The document could not be parsed as a tree
    Malformed { message: String },

    /// The root element is in the wrong namespace (or none)
    NamespaceMismatch {
        expected: String,
        found: Option<String>,
    },

    /// A section element is absent
    MissingSection { element: String },
}

impl ValidationIssue {
    fn missing(element: &str) -> Self {
        Self::MissingSection {
            element: element.to_string(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { message } => write!(f, "Document is not well-formed XML: {}", message),
            Self::NamespaceMismatch { expected, found } => match found {
                Some(found) => write!(
                    f,
                    "Root namespace '{}' does not match expected '{}'",
                    found, expected
                ),
                None => write!(f, "Root element has no namespace, expected '{}'", expected),
            },
            Self::MissingSection { element } => write!(f, "Missing <{}> element", element),
        }
    }
}

/// Outcome of structural validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when no errors were recorded (warnings do not count)
    pub is_valid: bool,

    /// Blocking findings
    pub errors: Vec<ValidationIssue>,

    /// Non-blocking findings
    pub warnings: Vec<ValidationIssue>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    /// Create an empty, valid result
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record an error; the result becomes invalid
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
        self.is_valid = false;
    }

    /// Record a warning
    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Whether any error is a namespace mismatch
    pub fn has_namespace_error(&self) -> bool {
        self.errors
            .iter()
            .any(|e| matches!(e, ValidationIssue::NamespaceMismatch { .. }))
    }

    /// Whether the input failed to parse
    pub fn is_malformed(&self) -> bool {
        self.errors
            .iter()
            .any(|e| matches!(e, ValidationIssue::Malformed { .. }))
    }

    /// Export as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Report")?;
        writeln!(f, "=================")?;
        writeln!(f, "Status: {}", if self.is_valid { "VALID" } else { "INVALID" })?;
        writeln!(
            f,
            "{} error(s), {} warning(s)",
            self.errors.len(),
            self.warnings.len()
        )?;

        if !self.errors.is_empty() {
            writeln!(f, "\nErrors:")?;
            for error in &self.errors {
                writeln!(f, "  ✗ {}", error)?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f, "\nWarnings:")?;
            for warning in &self.warnings {
                writeln!(f, "  ⚠ {}", warning)?;
            }
        }

        Ok(())
    }
}

/// Validates SSP structure against an expected namespace
#[derive(Debug, Clone)]
pub struct DocumentValidator {
    expected_namespace: String,
}

impl Default for DocumentValidator {
    fn default() -> Self {
        Self::new(OSCAL_NAMESPACE)
    }
}

impl DocumentValidator {
    /// Create a validator expecting `namespace` on the root element
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            expected_namespace: namespace.into(),
        }
    }

    /// The namespace the root element must carry
    pub fn expected_namespace(&self) -> &str {
        &self.expected_namespace
    }

    /// Validate raw document text
    pub fn validate_str(&self, xml: &str) -> ValidationResult {
        match XmlTree::parse(xml) {
            Ok(tree) => self.validate(&tree),
            Err(e) => {
                let mut result = ValidationResult::new();
                result.add_error(ValidationIssue::Malformed {
                    message: e.to_string(),
                });
                tracing::warn!(error = %e, "SSP validation failed: document is malformed");
                result
            }
        }
    }

    /// Validate an already-parsed document
    pub fn validate<D: TreeNavigator + ?Sized>(&self, doc: &D) -> ValidationResult {
        let mut result = ValidationResult::new();

        let Some(root) = doc.root_element() else {
            result.add_error(ValidationIssue::Malformed {
                message: "document has no root element".to_string(),
            });
            return result;
        };

        let found = doc.namespace_uri(root);
        if found != Some(self.expected_namespace.as_str()) {
            result.add_error(ValidationIssue::NamespaceMismatch {
                expected: self.expected_namespace.clone(),
                found: found.map(str::to_string),
            });
        }

        for required in ["metadata", "system-characteristics"] {
            if doc.first_descendant_named(root, required).is_none() {
                result.add_error(ValidationIssue::missing(required));
            }
        }

        if doc.first_descendant_named(root, "control-implementation").is_none() {
            result.add_warning(ValidationIssue::missing("control-implementation"));
        }

        tracing::info!(
            valid = result.is_valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "SSP structure validated"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"<system-security-plan xmlns="http://csrc.nist.gov/ns/oscal/1.0">
  <metadata><title>Test</title></metadata>
  <system-characteristics><system-name>Sys</system-name></system-characteristics>
  <control-implementation/>
</system-security-plan>"#;

    #[test]
    fn test_valid_document() {
        let result = DocumentValidator::default().validate_str(VALID);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_wrong_namespace() {
        let xml = VALID.replace("http://csrc.nist.gov/ns/oscal/1.0", "urn:other");
        let result = DocumentValidator::default().validate_str(&xml);
        assert!(!result.is_valid);
        assert!(result.has_namespace_error());
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_no_namespace() {
        let xml = VALID.replace(r#" xmlns="http://csrc.nist.gov/ns/oscal/1.0""#, "");
        let result = DocumentValidator::default().validate_str(&xml);
        assert!(result.has_namespace_error());
        assert_eq!(
            result.errors[0],
            ValidationIssue::NamespaceMismatch {
                expected: OSCAL_NAMESPACE.to_string(),
                found: None,
            }
        );
    }

    #[test]
    fn test_missing_required_sections() {
        let xml = r#"<system-security-plan xmlns="http://csrc.nist.gov/ns/oscal/1.0"><control-implementation/></system-security-plan>"#;
        let result = DocumentValidator::default().validate_str(xml);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                ValidationIssue::missing("metadata"),
                ValidationIssue::missing("system-characteristics"),
            ]
        );
    }

    #[test]
    fn test_missing_control_implementation_is_warning() {
        let xml = VALID.replace("<control-implementation/>", "");
        let result = DocumentValidator::default().validate_str(&xml);
        assert!(result.is_valid);
        assert_eq!(result.warnings, vec![ValidationIssue::missing("control-implementation")]);
    }

    #[test]
    fn test_nested_sections_count() {
        let xml = r#"<system-security-plan xmlns="http://csrc.nist.gov/ns/oscal/1.0"><wrapper><metadata/><system-characteristics/></wrapper></system-security-plan>"#;
        let result = DocumentValidator::default().validate_str(xml);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_malformed_is_single_error() {
        let result = DocumentValidator::default().validate_str("<system-security-plan><metadata>");
        assert!(!result.is_valid);
        assert!(result.is_malformed());
        assert_eq!(result.errors.len(), 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_custom_namespace() {
        let xml = r#"<ssp xmlns="urn:custom"><metadata/><system-characteristics/><control-implementation/></ssp>"#;
        let result = DocumentValidator::new("urn:custom").validate_str(xml);
        assert!(result.is_valid);
    }

    #[test]
    fn test_report_display_and_json() {
        let result = DocumentValidator::default().validate_str("<x/>");
        let text = result.to_string();
        assert!(text.contains("INVALID"));
        assert!(text.contains("Missing <metadata> element"));

        let json = result.to_json().unwrap();
        assert!(json.contains("\"namespace-mismatch\""));
        assert!(json.contains("\"is_valid\": false"));
    }
}
