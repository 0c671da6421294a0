// Fleet snapshot and the opaque analyzer result

use serde::{Deserialize, Serialize};

use super::InstanceRecord;

/// CPU-utilization thresholds used by the analyzer to classify instances
/// as under-utilized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Threshold {
    pub avg: u32,
    pub max: u32,
}

impl Default for Threshold {
    fn default() -> Self {
        Self { avg: 5, max: 30 }
    }
}

/// Everything collected in one run: instance records, the anonymized owner
/// id, and the thresholds stamped in before upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct FleetSnapshot {
    pub instances: Vec<InstanceRecord>,
    pub owner_id: String,
    #[serde(default)]
    pub threshold: Threshold,
}

impl FleetSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// First non-empty value wins; later reservations (and regions) never
    /// overwrite it.
    pub fn set_owner_once(&mut self, anonymized: &str) {
        if self.owner_id.is_empty() && !anonymized.is_empty() {
            self.owner_id = anonymized.to_string();
        }
    }
}

/// Server-computed aggregate (histograms, distributions, efficiency,
/// under-utilized listing). Opaque here: persisted and displayed, never
/// computed locally.
pub type SummaryResult = serde_json::Value;
