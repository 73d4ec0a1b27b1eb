//! Document metadata

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{child_text_in, expect_element};
use crate::error::Result;
use crate::tree::{NodeId, TreeNavigator};

/// Title and versioning of the plan, from the single `metadata` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub version: String,
    pub oscal_version: String,

    /// `last-modified` parsed as RFC 3339; `None` when absent or unparsable
    pub last_modified: Option<DateTime<FixedOffset>>,

    /// `last-modified` exactly as written (trimmed)
    pub last_modified_raw: String,
}

impl Metadata {
    /// Build from a `metadata` element
    ///
    /// Only children in `namespace` (or in no namespace) are read.
    pub fn from_node<D: TreeNavigator + ?Sized>(
        doc: &D,
        node: NodeId,
        namespace: Option<&str>,
    ) -> Result<Self> {
        expect_element(doc, node, "metadata")?;

        let text = |name: &str| child_text_in(doc, node, name, namespace);
        let last_modified_raw = text("last-modified");
        let last_modified = if last_modified_raw.is_empty() {
            None
        } else {
            match DateTime::parse_from_rfc3339(&last_modified_raw) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    tracing::debug!(value = %last_modified_raw, error = %e, "Unparsable last-modified timestamp");
                    None
                }
            }
        };

        Ok(Self {
            title: text("title"),
            version: text("version"),
            oscal_version: text("oscal-version"),
            last_modified,
            last_modified_raw,
        })
    }
}
