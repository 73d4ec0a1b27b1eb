//! Status Vocabulary
//!
//! Closed sets of `implementation-status` and `control-origination` values
//! recognized in SSP control properties, each with a stable ordinal.
//!
//! The extractor does not interpret these; renderers use the ordinals to
//! pick which region of an output artifact to mark for a control.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Property name carrying a control's implementation status
pub const IMPLEMENTATION_STATUS_PROP: &str = "implementation-status";

/// Property name carrying a control's origination
pub const CONTROL_ORIGINATION_PROP: &str = "control-origination";

/// Recognized `implementation-status` values and their ordinals
pub const IMPLEMENTATION_STATUSES: &[(&str, u8)] = &[
    ("implemented", 0),
    ("partially-implemented", 1),
    ("planned", 2),
    ("alternative-implementation", 3),
    ("not-applicable", 4),
];

/// Recognized `control-origination` values and their ordinals
pub const CONTROL_ORIGINATIONS: &[(&str, u8)] = &[
    ("service-provider-corporate", 0),
    ("service-provider-system-specific", 1),
    ("service-provider-hybrid", 2),
    ("configured-by-customer", 3),
    ("provided-by-customer", 4),
    ("shared", 5),
    ("inherited", 6),
];

fn lookup(table: &[(&str, u8)], value: &str) -> Option<u8> {
    table
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, ordinal)| *ordinal)
}

/// Ordinal for an `implementation-status` value (exact match)
pub fn implementation_status_ordinal(value: &str) -> Option<u8> {
    lookup(IMPLEMENTATION_STATUSES, value)
}

/// Ordinal for a `control-origination` value (exact match)
pub fn control_origination_ordinal(value: &str) -> Option<u8> {
    lookup(CONTROL_ORIGINATIONS, value)
}

/// Implementation state of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImplementationStatus {
    Implemented,
    PartiallyImplemented,
    Planned,
    AlternativeImplementation,
    NotApplicable,
}

impl ImplementationStatus {
    /// Parse a property value; `None` if outside the vocabulary
    pub fn parse(value: &str) -> Option<Self> {
        implementation_status_ordinal(value).and_then(Self::from_ordinal)
    }

    /// Variant for an ordinal from [`IMPLEMENTATION_STATUSES`]
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::all().into_iter().find(|s| s.ordinal() == ordinal)
    }

    /// Value as written in SSP documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Implemented => "implemented",
            Self::PartiallyImplemented => "partially-implemented",
            Self::Planned => "planned",
            Self::AlternativeImplementation => "alternative-implementation",
            Self::NotApplicable => "not-applicable",
        }
    }

    /// Stable ordinal
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn all() -> [Self; 5] {
        [
            Self::Implemented,
            Self::PartiallyImplemented,
            Self::Planned,
            Self::AlternativeImplementation,
            Self::NotApplicable,
        ]
    }
}

impl fmt::Display for ImplementationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is responsible for a control's implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlOrigination {
    ServiceProviderCorporate,
    ServiceProviderSystemSpecific,
    ServiceProviderHybrid,
    ConfiguredByCustomer,
    ProvidedByCustomer,
    Shared,
    Inherited,
}

impl ControlOrigination {
    /// Parse a property value; `None` if outside the vocabulary
    pub fn parse(value: &str) -> Option<Self> {
        control_origination_ordinal(value).and_then(Self::from_ordinal)
    }

    /// Variant for an ordinal from [`CONTROL_ORIGINATIONS`]
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::all().into_iter().find(|o| o.ordinal() == ordinal)
    }

    /// Value as written in SSP documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServiceProviderCorporate => "service-provider-corporate",
            Self::ServiceProviderSystemSpecific => "service-provider-system-specific",
            Self::ServiceProviderHybrid => "service-provider-hybrid",
            Self::ConfiguredByCustomer => "configured-by-customer",
            Self::ProvidedByCustomer => "provided-by-customer",
            Self::Shared => "shared",
            Self::Inherited => "inherited",
        }
    }

    /// Stable ordinal
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn all() -> [Self; 7] {
        [
            Self::ServiceProviderCorporate,
            Self::ServiceProviderSystemSpecific,
            Self::ServiceProviderHybrid,
            Self::ConfiguredByCustomer,
            Self::ProvidedByCustomer,
            Self::Shared,
            Self::Inherited,
        ]
    }
}

impl fmt::Display for ControlOrigination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
