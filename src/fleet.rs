// Fleet enumeration: one snapshot per run, regions processed in order.
//
// Failure policy: fail hard. A connect or listing failure in any region
// aborts the whole enumeration and the run ends with an empty result, even
// if earlier regions already produced records. Harsh on purpose (a partial
// fleet would skew the server-side analysis); a single instance's metric
// outage is handled softly in collector.rs instead.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::cloud::CloudConnector;
use crate::collector;
use crate::models::{FleetSnapshot, InstanceRecord, InstanceState, MetricSeries};

const TERMINATED: &str = "terminated";

/// Hashes the account identifier so snapshots can be grouped without
/// exposing it. Missing owners hash a fixed placeholder.
pub fn anonymize_owner(owner_id: Option<&str>) -> String {
    let digest = Sha256::digest(owner_id.unwrap_or("0").as_bytes());
    hex::encode(digest)[..16].to_string()
}

pub struct FleetCollector<'a> {
    connector: &'a dyn CloudConnector,
    lookback_days: u32,
    period_secs: u32,
}

impl<'a> FleetCollector<'a> {
    pub fn new(connector: &'a dyn CloudConnector, lookback_days: u32, period_secs: u32) -> Self {
        Self {
            connector,
            lookback_days,
            period_secs,
        }
    }

    /// Lists every non-terminated instance in every region and attaches its
    /// CPU series. The snapshot's owner id is set from the first reservation
    /// encountered and never overwritten.
    pub async fn collect(&self, regions: &[String]) -> Result<FleetSnapshot> {
        let mut snapshot = FleetSnapshot::new();

        for region in regions {
            info!(region = %region, "collecting stats");

            // Both failures abort the run: all-or-nothing per region.
            let (instances_api, metrics_api) = self
                .connector
                .connect(region)
                .await
                .with_context(|| format!("failed to connect to {region}"))?;
            let reservations = instances_api
                .list_reservations()
                .await
                .with_context(|| format!("failed to list instances in {region}"))?;

            for reservation in reservations {
                snapshot.set_owner_once(&anonymize_owner(reservation.owner_id.as_deref()));

                for inst in reservation.instances {
                    if inst.state_name == TERMINATED {
                        continue;
                    }
                    let stats: MetricSeries = collector::collect_cpu_stats(
                        metrics_api.as_ref(),
                        &inst.instance_id,
                        self.lookback_days,
                        self.period_secs,
                    )
                    .await;

                    snapshot.instances.push(InstanceRecord {
                        region: region.clone(),
                        instance_id: inst.instance_id,
                        instance_type: inst.instance_type,
                        state: InstanceState {
                            code: inst.state_code,
                            name: inst.state_name,
                        },
                        tags: inst.tags,
                        stats,
                    });
                }
            }
        }

        info!(instances = snapshot.instances.len(), "fleet scan complete");
        Ok(snapshot)
    }
}
