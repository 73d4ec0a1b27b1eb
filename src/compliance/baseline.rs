//! Baseline Classification
//!
//! Classifies an SSP into a FedRAMP impact baseline from its declared
//! security sensitivity level.
//!
//! | Sensitivity level | Baseline |
//! |-------------------|----------|
//! | `low`             | Low      |
//! | `moderate`        | Moderate |
//! | `high`            | High     |
//! | anything else     | Moderate |
//!
//! Classification never fails. An absent element, an unrecognized value, or
//! a document that does not parse all fall back to Moderate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tree::{TreeNavigator, XmlTree};

/// Element carrying the sensitivity hint
pub const SENSITIVITY_LEVEL_ELEMENT: &str = "security-sensitivity-level";

/// Compliance baseline tier
///
/// Ordered from least to most stringent, with `Unknown` below all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineLevel {
    /// Not yet classified
    Unknown,

    /// Limited adverse effect on loss of confidentiality, integrity, or availability
    Low,

    /// Serious adverse effect; the most common authorization level
    #[default]
    Moderate,

    /// Severe or catastrophic adverse effect
    High,
}

impl BaselineLevel {
    /// Human-readable name for display and logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Low => "FedRAMP Low",
            Self::Moderate => "FedRAMP Moderate",
            Self::High => "FedRAMP High",
        }
    }

    /// Lowercase identifier as it appears in SSP documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }

    /// Match a sensitivity level value, ignoring case and surrounding whitespace
    ///
    /// Only the three impact levels are recognized; `unknown` is not.
    pub fn from_sensitivity(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("low") {
            Some(Self::Low)
        } else if value.eq_ignore_ascii_case("moderate") {
            Some(Self::Moderate)
        } else if value.eq_ignore_ascii_case("high") {
            Some(Self::High)
        } else {
            None
        }
    }

    /// All tiers in ascending order
    pub fn all() -> [Self; 4] {
        [Self::Unknown, Self::Low, Self::Moderate, Self::High]
    }
}

impl fmt::Display for BaselineLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for [`BaselineLevel::from_str`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid baseline: {0}. Valid options: low, moderate, high, unknown")]
pub struct ParseBaselineError(pub String);

impl FromStr for BaselineLevel {
    type Err = ParseBaselineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("unknown") {
            return Ok(Self::Unknown);
        }
        Self::from_sensitivity(s).ok_or_else(|| ParseBaselineError(s.to_string()))
    }
}

/// Classify a parsed document
///
/// Reads the first `security-sensitivity-level` element in document order.
pub fn detect_baseline<D: TreeNavigator + ?Sized>(doc: &D) -> BaselineLevel {
    let Some(element) = doc.first_descendant_named(doc.document(), SENSITIVITY_LEVEL_ELEMENT) else {
        tracing::debug!("No sensitivity level declared, defaulting to Moderate");
        return BaselineLevel::Moderate;
    };

    let value = doc.descendant_text(element);
    match BaselineLevel::from_sensitivity(&value) {
        Some(level) => level,
        None => {
            tracing::debug!(value = %value.trim(), "Unrecognized sensitivity level, defaulting to Moderate");
            BaselineLevel::Moderate
        }
    }
}

/// Classify raw document text; unparsable input is Moderate
pub fn detect_baseline_str(xml: &str) -> BaselineLevel {
    match XmlTree::parse(xml) {
        Ok(tree) => detect_baseline(&tree),
        Err(e) => {
            tracing::debug!(error = %e, "Document did not parse, defaulting to Moderate");
            BaselineLevel::Moderate
        }
    }
}
