// Domain models (wire format ported from the original collector)

mod instance;
mod snapshot;

pub use instance::{InstanceRecord, InstanceState, MetricPoint, MetricSeries, Tag};
pub use snapshot::{FleetSnapshot, SummaryResult, Threshold};
