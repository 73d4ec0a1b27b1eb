//! Extraction Orchestrator
//!
//! Walks the root's direct children once and assembles the aggregate
//! [`SspDocument`].
//!
//! # Section handling
//!
//! - first `metadata` child → [`Metadata`]
//! - first `system-characteristics` child → [`SystemCharacteristics`]
//! - every `control-implementation` child → its direct
//!   `implemented-requirement` children, appended in document order
//!
//! A missing section leaves the corresponding field `None`. Requirements
//! without a `control-id` are dropped from the control list (logged at debug
//! level, never an error).
//!
//! # Parallelism
//!
//! Each requirement only depends on its own subtree, so with the `parallel`
//! feature a large `control-implementation` is extracted on the rayon pool.
//! Results come back through an indexed parallel iterator, which keeps
//! document order.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::compliance::{detect_baseline, BaselineLevel, DocumentValidator, ValidationResult};
use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::model::{
    in_namespace, Metadata, SecurityControl, SystemCharacteristics, IMPLEMENTED_REQUIREMENT,
};
use crate::tree::{NodeId, TreeNavigator, XmlTree};

/// Everything extracted from one SSP
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SspDocument {
    pub metadata: Option<Metadata>,
    pub system_characteristics: Option<SystemCharacteristics>,

    /// Qualified controls in document order
    pub controls: Vec<SecurityControl>,
}

impl SspDocument {
    /// First control with the given `control-id`
    pub fn control(&self, control_id: &str) -> Option<&SecurityControl> {
        self.controls.iter().find(|c| c.control_id == control_id)
    }

    /// Number of extracted controls
    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    /// Whether both required sections were present
    pub fn is_complete(&self) -> bool {
        self.metadata.is_some() && self.system_characteristics.is_some()
    }
}

/// Validation, classification, and extraction of one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedSsp {
    pub validation: ValidationResult,
    pub baseline: BaselineLevel,

    /// `None` only when the input did not parse
    pub document: Option<SspDocument>,
}

/// Runs extraction with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractionConfig,
}

impl Extractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Parse and extract; fails only when the text is not well-formed XML
    pub fn extract_str(&self, xml: &str) -> Result<SspDocument> {
        let tree = XmlTree::parse(xml)?;
        self.extract(&tree)
    }

    /// Read, parse, and extract a document from disk
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<SspDocument> {
        let tree = XmlTree::from_file(path)?;
        self.extract(&tree)
    }

    /// Extract from an already-parsed document
    pub fn extract<D: TreeNavigator + Sync + ?Sized>(&self, doc: &D) -> Result<SspDocument> {
        let mut out = SspDocument::default();
        let Some(root) = doc.root_element() else {
            return Ok(out);
        };
        let namespace = doc.namespace_uri(root);
        let mut skipped = 0;

        for child in doc.element_children(root) {
            if !in_namespace(doc, child, namespace) {
                continue;
            }
            match doc.local_name(child) {
                Some("metadata") if out.metadata.is_none() => {
                    debug!("Extracting metadata");
                    out.metadata = Some(Metadata::from_node(doc, child, namespace)?);
                }
                Some("system-characteristics") if out.system_characteristics.is_none() => {
                    debug!("Extracting system characteristics");
                    out.system_characteristics = Some(SystemCharacteristics::from_node(doc, child, namespace)?);
                }
                Some("control-implementation") => {
                    skipped += self.extract_requirements(doc, child, namespace, &mut out.controls)?;
                }
                _ => {}
            }
        }

        info!(
            controls = out.controls.len(),
            skipped,
            has_metadata = out.metadata.is_some(),
            has_system_characteristics = out.system_characteristics.is_some(),
            "SSP extraction complete"
        );

        Ok(out)
    }

    /// Validate, classify, and extract in one go
    ///
    /// Malformed input is reported through the validation result rather
    /// than as an error.
    pub fn process_str(&self, xml: &str) -> ProcessedSsp {
        let validator = DocumentValidator::new(self.config.expected_namespace.clone());
        let tree = match XmlTree::parse(xml) {
            Ok(tree) => tree,
            Err(_) => {
                return ProcessedSsp {
                    validation: validator.validate_str(xml),
                    baseline: BaselineLevel::Moderate,
                    document: None,
                };
            }
        };

        ProcessedSsp {
            validation: validator.validate(&tree),
            baseline: detect_baseline(&tree),
            document: self.extract(&tree).ok(),
        }
    }

    /// Append qualified controls from one section; returns how many were skipped
    fn extract_requirements<D: TreeNavigator + Sync + ?Sized>(
        &self,
        doc: &D,
        section: NodeId,
        namespace: Option<&str>,
        controls: &mut Vec<SecurityControl>,
    ) -> Result<usize> {
        let requirements: Vec<NodeId> = doc
            .children_named(section, IMPLEMENTED_REQUIREMENT)
            .into_iter()
            .filter(|&node| in_namespace(doc, node, namespace))
            .collect();

        debug!(requirements = requirements.len(), "Extracting control implementation");

        let mut skipped = 0;
        for (ordinal, result) in self.build_controls(doc, &requirements, namespace).into_iter().enumerate() {
            match result? {
                Some(control) => controls.push(control),
                None => {
                    skipped += 1;
                    debug!(ordinal, "Skipping implemented-requirement without control-id");
                }
            }
        }
        Ok(skipped)
    }

    #[cfg(feature = "parallel")]
    fn build_controls<D: TreeNavigator + Sync + ?Sized>(
        &self,
        doc: &D,
        requirements: &[NodeId],
        namespace: Option<&str>,
    ) -> Vec<Result<Option<SecurityControl>>> {
        use rayon::prelude::*;

        if self.config.parallel && requirements.len() >= self.config.parallel_threshold {
            debug!(requirements = requirements.len(), "Extracting requirements in parallel");
            return requirements
                .par_iter()
                .enumerate()
                .map(|(ordinal, &node)| SecurityControl::from_node(doc, node, ordinal, namespace))
                .collect();
        }
        build_sequential(doc, requirements, namespace)
    }

    #[cfg(not(feature = "parallel"))]
    fn build_controls<D: TreeNavigator + Sync + ?Sized>(
        &self,
        doc: &D,
        requirements: &[NodeId],
        namespace: Option<&str>,
    ) -> Vec<Result<Option<SecurityControl>>> {
        build_sequential(doc, requirements, namespace)
    }
}

fn build_sequential<D: TreeNavigator + ?Sized>(
    doc: &D,
    requirements: &[NodeId],
    namespace: Option<&str>,
) -> Vec<Result<Option<SecurityControl>>> {
    requirements
        .iter()
        .enumerate()
        .map(|(ordinal, &node)| SecurityControl::from_node(doc, node, ordinal, namespace))
        .collect()
}
