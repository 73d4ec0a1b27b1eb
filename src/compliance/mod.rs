//! Document Classification and Validation
//!
//! Inspects a parsed SSP for the structural markers extraction relies on,
//! classifies it into a FedRAMP baseline, and carries the closed status
//! vocabulary renderers use to interpret control properties.
//!
//! # Overview
//!
//! - [`DocumentValidator`]: namespace and required-section checks producing a
//!   [`ValidationResult`] with separate error and warning lists
//! - [`detect_baseline`]: sensitivity-level classification into a
//!   [`BaselineLevel`], defaulting to Moderate
//! - [`vocabulary`]: `implementation-status` / `control-origination` tables
//!
//! Validation and classification depend only on the tree navigator and can
//! run alongside extraction on the same parsed document.
//!
//! # Usage
//!
//! ```ignore
//! use oscal_ssp::compliance::{detect_baseline, DocumentValidator};
//!
//! let tree = XmlTree::parse(&xml)?;
//! let report = DocumentValidator::default().validate(&tree);
//! let baseline = detect_baseline(&tree);
//! ```

mod baseline;
mod validation;
pub mod vocabulary;

pub use baseline::{
    detect_baseline, detect_baseline_str, BaselineLevel, ParseBaselineError,
    SENSITIVITY_LEVEL_ELEMENT,
};
pub use validation::{DocumentValidator, ValidationIssue, ValidationResult};
pub use vocabulary::{ControlOrigination, ImplementationStatus};
