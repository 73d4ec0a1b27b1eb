//! # oscal-ssp
//!
//! Structured extraction and fingerprinting for OSCAL System Security Plan
//! (SSP) XML documents.
//!
//! This crate parses an SSP into a navigable tree, assigns every node a
//! position-based fingerprint that stays stable across re-parses, and turns
//! the relevant sections into strongly-typed, immutable entities.
//!
//! ## Features
//!
//! - **Tree navigation** ([`tree`]): namespace-aware arena DOM behind the
//!   [`TreeNavigator`](tree::TreeNavigator) trait
//! - **Fingerprinting** ([`fingerprint`]): indexed and index-free paths plus a
//!   compact structural shape for any node
//! - **Entities** ([`model`]): metadata, system characteristics, and
//!   implemented requirements with properties, statements, parameters, and
//!   responsible roles
//! - **Classification** ([`compliance`]): FedRAMP baseline detection,
//!   structural validation, and the implementation-status vocabulary
//! - **Extraction** ([`Extractor`]): one-pass assembly of an [`SspDocument`],
//!   optionally parallel across requirements (feature `parallel`)
//!
//! ## Quick Start
//!
//! ```ignore
//! use oscal_ssp::{Extractor, ExtractionConfig};
//! use oscal_ssp::compliance::{detect_baseline, DocumentValidator};
//! use oscal_ssp::tree::XmlTree;
//!
//! let tree = XmlTree::from_file("ssp.xml")?;
//!
//! let report = DocumentValidator::default().validate(&tree);
//! if !report.is_valid {
//!     eprintln!("{}", report);
//! }
//!
//! let baseline = detect_baseline(&tree);
//! let document = Extractor::new(ExtractionConfig::from_env()).extract(&tree)?;
//! for control in &document.controls {
//!     println!("{} {:?}", control.control_id, control.implementation_status());
//! }
//! ```

pub mod compliance;
mod config;
mod error;
mod extract;
pub mod fingerprint;
pub mod model;
pub mod observability;
pub mod render;
pub mod testing;
pub mod tree;

// Re-exports
pub use config::{ExtractionConfig, ExtractionConfigBuilder, DEFAULT_PARALLEL_THRESHOLD};
pub use error::{Result, SspError};
pub use extract::{Extractor, ProcessedSsp, SspDocument};
pub use fingerprint::Fingerprint;

/// OSCAL 1.0 XML namespace
pub const OSCAL_NAMESPACE: &str = "http://csrc.nist.gov/ns/oscal/1.0";
