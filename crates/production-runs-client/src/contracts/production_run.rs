//! Production run record
//!
//! The server owns the schema. Known fields are typed for convenience and
//! anything else is kept in `extra` so records survive a read/write cycle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status value marking a run whose instances are still being produced
pub const STATUS_IN_PROGRESS: &str = "In Progress";

/// A production run as exchanged with the server
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRun {
    /// Server-assigned identifier (absent before creation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,

    /// Number of instances in the run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Fields not modelled above, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ProductionRun {
    /// Create an empty run for the given product
    pub fn new(run_code: impl Into<String>, product_code: impl Into<String>) -> Self {
        Self {
            run_code: Some(run_code.into()),
            product_code: Some(product_code.into()),
            ..Default::default()
        }
    }

    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Add a field the typed view does not model
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Identifier rendered for use in a request path
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| match id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn is_in_progress(&self) -> bool {
        self.status.as_deref() == Some(STATUS_IN_PROGRESS)
    }
}
