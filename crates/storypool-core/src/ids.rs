//! Opaque identifiers shared across the pipeline core.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one scheduled step, generated at enqueue time.
///
/// A plain UUIDv4 string rather than a sortable UUIDv7: it is a Redis hash
/// key suffix, not a row that benefits from index locality, and the wire
/// format must match the plain string the ingress already hands out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(String);

impl StepId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StepId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StepId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<StepId> for String {
    fn from(id: StepId) -> Self {
        id.0
    }
}

/// Identifies one end-to-end pipeline execution, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineId(String);

impl PipelineId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PipelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PipelineId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<PipelineId> for String {
    fn from(id: PipelineId) -> Self {
        id.0
    }
}

/// A processor's order tag. Orders 31/32 use the two-digit encoding
/// `parent_order * 10 + branch` described in the Processor Registry spec;
/// the Executor treats the value opaquely, so it is a bare `u32` rather than
/// an enum.
pub type Order = u32;
