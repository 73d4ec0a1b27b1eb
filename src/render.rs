//! Document rendering
//!
//! Renderers take ownership of an extracted [`SspDocument`] together with
//! its [`BaselineLevel`] and turn them into an output artifact. The
//! extraction core never depends on a renderer.
//!
//! [`JsonRenderer`] is the built-in implementation. It emits the document
//! alongside a [`StatusSummary`] computed through the status vocabulary.

use serde::Serialize;

use crate::compliance::{BaselineLevel, ImplementationStatus};
use crate::error::{Result, SspError};
use crate::extract::SspDocument;

/// Turns an extracted document into an output artifact
pub trait DocumentRenderer {
    type Output;
    type Error;

    fn render(
        &self,
        document: SspDocument,
        baseline: BaselineLevel,
    ) -> std::result::Result<Self::Output, Self::Error>;
}

/// Number of controls carrying one implementation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: ImplementationStatus,
    pub count: usize,
}

/// Per-status control counts, in vocabulary order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub by_status: Vec<StatusCount>,

    /// Controls with no recognized `implementation-status`
    pub unspecified: usize,

    /// Controls naming more than one responsible role
    pub shared_responsibility: usize,
}

impl StatusSummary {
    pub fn of(document: &SspDocument) -> Self {
        let mut by_status: Vec<StatusCount> = ImplementationStatus::all()
            .into_iter()
            .map(|status| StatusCount { status, count: 0 })
            .collect();
        let mut unspecified = 0;

        for control in &document.controls {
            match control.implementation_status() {
                Some(status) => by_status[status.ordinal() as usize].count += 1,
                None => unspecified += 1,
            }
        }

        Self {
            total: document.controls.len(),
            by_status,
            unspecified,
            shared_responsibility: document
                .controls
                .iter()
                .filter(|c| c.has_multiple_responsible_roles())
                .count(),
        }
    }

    /// Count for one status
    pub fn count(&self, status: ImplementationStatus) -> usize {
        self.by_status
            .iter()
            .find(|c| c.status == status)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

#[derive(Serialize)]
struct RenderedSsp {
    baseline: BaselineLevel,
    baseline_name: &'static str,
    summary: StatusSummary,
    #[serde(flatten)]
    document: SspDocument,
}

/// Renders to a JSON string
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl DocumentRenderer for JsonRenderer {
    type Output = String;
    type Error = SspError;

    fn render(&self, document: SspDocument, baseline: BaselineLevel) -> Result<String> {
        let rendered = RenderedSsp {
            baseline,
            baseline_name: baseline.name(),
            summary: StatusSummary::of(&document),
            document,
        };
        let json = if self.pretty {
            serde_json::to_string_pretty(&rendered)?
        } else {
            serde_json::to_string(&rendered)?
        };
        Ok(json)
    }
}
