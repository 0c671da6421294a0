// Per-instance identity, lifecycle state and attached metric series

use serde::{Deserialize, Serialize};

/// One CloudWatch sample. The timestamp is formatted at the collection
/// boundary so it serializes (and round-trips) as a plain string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct MetricPoint {
    pub timestamp: String,
    pub average: f64,
    pub maximum: f64,
    pub unit: String,
}

/// Average/Maximum CPU utilization over the lookback window.
/// An empty `datapoints` means the metric fetch failed or returned nothing;
/// the instance record is kept either way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct MetricSeries {
    pub label: String,
    pub datapoints: Vec<MetricPoint>,
}

impl MetricSeries {
    pub fn empty() -> Self {
        Self {
            label: "CPUUtilization".into(),
            datapoints: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.datapoints.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceState {
    pub code: Option<i32>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// One compute instance plus its collected series. Immutable once pushed
/// into a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceRecord {
    pub region: String,
    pub instance_id: String,
    pub instance_type: String,
    pub state: InstanceState,
    pub tags: Vec<Tag>,
    pub stats: MetricSeries,
}
