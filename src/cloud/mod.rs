// Provider seam: listing and metrics behind traits so the pipeline can be
// exercised against fakes. The live AWS implementation lives in aws.rs.

mod aws;

pub use aws::AwsConnector;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{MetricSeries, Tag};

/// Static credentials for the live provider.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

/// One reservation from the instance listing. The owner id is the raw
/// account identifier; anonymization happens in the fleet enumerator.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub owner_id: Option<String>,
    pub instances: Vec<InstanceDescription>,
}

#[derive(Debug, Clone)]
pub struct InstanceDescription {
    pub instance_id: String,
    pub instance_type: String,
    pub state_name: String,
    pub state_code: Option<i32>,
    pub tags: Vec<Tag>,
}

/// Lists all instances in one region, unfiltered.
#[async_trait]
pub trait InstanceApi: Send + Sync {
    async fn list_reservations(&self) -> Result<Vec<Reservation>>;
}

/// Fetches the CPU-utilization series for one instance.
#[async_trait]
pub trait MetricsApi: Send + Sync {
    /// Average and maximum CPU percentage between `start` and `end`, one
    /// sample per `period_secs`.
    async fn cpu_utilization(
        &self,
        instance_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        period_secs: u32,
    ) -> Result<MetricSeries>;
}

/// Builds the per-region API pair. A connect failure aborts the whole
/// fleet scan (see fleet.rs).
#[async_trait]
pub trait CloudConnector: Send + Sync {
    async fn connect(
        &self,
        region: &str,
    ) -> Result<(Box<dyn InstanceApi>, Box<dyn MetricsApi>)>;
}
